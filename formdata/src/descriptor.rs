//! Form field descriptors handed to a template or UI layer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::value::FieldValue;

/// Input widget of a form field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Number,
    DateTime,
    Radio,
    Select,
    Password,
    Hidden,
    Checkbox,
    TextArea,
    RichText,
    /// Widget names the builder does not know; passed through verbatim
    Custom(String),
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::DateTime => "datetime",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Password => "password",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::TextArea => "textarea",
            Self::RichText => "rich-text-editor",
            Self::Custom(name) => name,
        }
    }

    /// Parse a widget name; unknown names become `Custom`
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "number" => Self::Number,
            "datetime" => Self::DateTime,
            "radio" => Self::Radio,
            "select" => Self::Select,
            "password" => Self::Password,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "textarea" => Self::TextArea,
            "rich-text-editor" | "eh-editor" => Self::RichText,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Widgets rendered from a plain string value
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Hidden | Self::TextArea | Self::RichText)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl Serialize for InputType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InputType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_name(&s))
    }
}

/// One choice of a radio group, select or checkbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            name: None,
            value: value.into(),
        }
    }

    /// The fixed Yes(1)/No(0) pair used for boolean fields
    pub fn yes_no() -> Vec<Self> {
        vec![Self::new("Yes", 1), Self::new("No", 0)]
    }

    /// Options built from enumeration values, label and value alike
    pub fn from_enum(values: &[String]) -> Vec<Self> {
        values.iter().map(|v| Self::new(v.clone(), v.clone())).collect()
    }
}

/// How to render and validate one form field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub required: bool,
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn input_type(&self) -> Option<&InputType> {
        self.input_type.as_ref()
    }
}

/// Result slot of a field lookup: a descriptor, or an error marker for a
/// name the builder does not know
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSlot {
    Field(FieldDescriptor),
    Missing { err: String },
}

impl FieldSlot {
    pub fn missing(name: &str) -> Self {
        Self::Missing {
            err: format!("unable to find \"{}\"", name),
        }
    }

    pub fn descriptor(&self) -> Option<&FieldDescriptor> {
        match self {
            Self::Field(d) => Some(d),
            Self::Missing { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Field(_) => None,
            Self::Missing { err } => Some(err),
        }
    }

    pub fn is_required(&self) -> bool {
        self.descriptor().is_some_and(|d| d.required)
    }
}
