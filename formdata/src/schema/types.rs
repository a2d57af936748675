use serde::{Deserialize, Serialize};

/// Type tag of a schema field, normalized across schema providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    Date,
    /// Array whose elements are described by `ArrayItem`
    Array(Box<ArrayItem>),
    /// Any tag the provider does not recognize; renders as plain text
    Unknown(String),
}

impl SchemaType {
    /// Parse a schema document type tag. Unrecognized tags map to `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "string" | "text" => Self::String,
            "number" | "integer" | "int" | "float" | "double" => Self::Number,
            "boolean" | "bool" => Self::Boolean,
            "date" | "datetime" => Self::Date,
            "array" => Self::Array(Box::new(ArrayItem::default())),
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
            Self::Array(item) => write!(f, "array<{}>", item.item_type),
            Self::Unknown(s) => write!(f, "unknown({})", s),
        }
    }
}

/// Element description of an array field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayItem {
    pub item_type: SchemaType,
    /// Enumeration declared on the element type; empty when the element
    /// carries none
    #[serde(default)]
    pub enum_values: Vec<String>,
}

impl Default for ArrayItem {
    fn default() -> Self {
        Self {
            item_type: SchemaType::Unknown("mixed".to_string()),
            enum_values: Vec::new(),
        }
    }
}

/// Numeric validation bounds copied onto `number` descriptors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}
