//! Model schema documents written in YAML or JSON.
//!
//! ```yaml
//! name: article
//! fields:
//!   title: { type: string, required: true, match: "^[A-Z]" }
//!   status: { type: string, enum: [draft, published], default: draft }
//!   tags: { type: array, items: { type: string, enum: [news, blog] } }
//!   author:
//!     name: { type: string, label: "Author name" }
//! ```
//!
//! Entries without a `type` key are nested groups; their children are
//! flattened to dotted paths (`author.name`).

use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::types::{ArrayItem, NumericConstraints, SchemaType};
use super::{SchemaField, SchemaSource};
use crate::{Error, Result};

/// A field parsed from a schema document
#[derive(Debug, Clone)]
pub struct DocumentField {
    pub path: String,
    pub schema_type: SchemaType,
    pub required: bool,
    pub enum_values: Vec<String>,
    pub default: Option<Value>,
    pub patterns: Vec<Regex>,
    pub constraints: NumericConstraints,
}

impl DocumentField {
    pub fn new(path: impl Into<String>, schema_type: SchemaType) -> Self {
        Self {
            path: path.into(),
            schema_type,
            required: false,
            enum_values: Vec::new(),
            default: None,
            patterns: Vec::new(),
            constraints: NumericConstraints::default(),
        }
    }
}

impl SchemaField for DocumentField {
    fn path(&self) -> &str {
        &self.path
    }

    fn schema_type(&self) -> &SchemaType {
        &self.schema_type
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(Regex::as_str).collect()
    }

    fn numeric_constraints(&self) -> NumericConstraints {
        self.constraints
    }
}

/// Schema of one model, in document order
#[derive(Debug, Clone)]
pub struct ModelSchema {
    pub name: String,
    fields: Vec<DocumentField>,
    /// Raw `fields` tree, kept for label lookups
    tree: Map<String, Value>,
}

impl ModelSchema {
    /// Load a schema file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let schema = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };
        tracing::debug!(
            "Loaded schema '{}' with {} fields from {}",
            schema.name,
            schema.fields.len(),
            path.display()
        );
        Ok(schema)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(Error::Schema("schema document must be a mapping".to_string()));
        };

        let name = match root.get("name") {
            Some(Value::String(s)) => s.clone(),
            _ => "model".to_string(),
        };

        let tree = match root.remove("fields") {
            Some(Value::Object(map)) => map,
            Some(_) => return Err(Error::Schema("'fields' must be a mapping".to_string())),
            None => return Err(Error::Schema("missing 'fields'".to_string())),
        };

        let mut fields = Vec::new();
        collect_fields("", &tree, &mut fields)?;

        Ok(Self { name, fields, tree })
    }

    pub fn field(&self, path: &str) -> Option<&DocumentField> {
        self.fields.iter().find(|f| f.path == path)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SchemaSource for ModelSchema {
    type Field = DocumentField;

    fn fields(&self) -> Vec<&DocumentField> {
        self.fields.iter().collect()
    }

    fn label_for(&self, path: &str) -> Option<String> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.tree.get(first)?;
        for segment in segments {
            node = node.get(segment)?;
        }
        node.get("label")?.as_str().map(str::to_string)
    }
}

fn collect_fields(prefix: &str, entries: &Map<String, Value>, out: &mut Vec<DocumentField>) -> Result<()> {
    for (key, entry) in entries {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match entry {
            Value::Object(map) if map.contains_key("type") => out.push(parse_field(&path, map)?),
            Value::Object(map) => collect_fields(&path, map, out)?,
            // `label` on a nested group is an override, not a field
            Value::String(_) if key == "label" && !prefix.is_empty() => {}
            Value::String(tag) => {
                let schema_type = parse_tag(&path, tag);
                out.push(DocumentField::new(path, schema_type));
            }
            Value::Array(items) => {
                let item = items.first().map(parse_array_item).unwrap_or_default();
                out.push(DocumentField::new(path, SchemaType::Array(Box::new(item))));
            }
            other => {
                return Err(Error::Schema(format!(
                    "field '{}' has an invalid definition: {}",
                    path, other
                )))
            }
        }
    }
    Ok(())
}

fn parse_field(path: &str, map: &Map<String, Value>) -> Result<DocumentField> {
    let schema_type = match map.get("type") {
        Some(Value::String(tag)) => match parse_tag(path, tag) {
            SchemaType::Array(_) => {
                let item = map.get("items").map(parse_array_item).unwrap_or_default();
                SchemaType::Array(Box::new(item))
            }
            other => other,
        },
        Some(Value::Array(items)) => {
            let item = items.first().map(parse_array_item).unwrap_or_default();
            SchemaType::Array(Box::new(item))
        }
        Some(other) => {
            return Err(Error::Schema(format!(
                "field '{}' has an invalid type: {}",
                path, other
            )))
        }
        None => SchemaType::Unknown("mixed".to_string()),
    };

    let mut field = DocumentField::new(path, schema_type);
    field.required = map.get("required").and_then(Value::as_bool).unwrap_or(false);
    field.enum_values = map.get("enum").map(enum_strings).unwrap_or_default();
    field.default = map.get("default").filter(|v| !v.is_null()).cloned();
    field.patterns = parse_patterns(path, map.get("match"))?;
    field.constraints = NumericConstraints {
        min: map.get("min").and_then(Value::as_f64),
        max: map.get("max").and_then(Value::as_f64),
        step: map.get("step").and_then(Value::as_f64),
    };

    Ok(field)
}

fn parse_tag(path: &str, tag: &str) -> SchemaType {
    let schema_type = SchemaType::from_tag(tag);
    if let SchemaType::Unknown(other) = &schema_type {
        tracing::warn!("Unknown schema type '{}' for field '{}', rendering as text", other, path);
    }
    schema_type
}

/// Element description of an array field. Anything without an element
/// shape is treated as an element type with no enumeration.
fn parse_array_item(value: &Value) -> ArrayItem {
    match value {
        Value::String(tag) => ArrayItem {
            item_type: SchemaType::from_tag(tag),
            enum_values: Vec::new(),
        },
        Value::Object(map) => ArrayItem {
            item_type: map
                .get("type")
                .and_then(Value::as_str)
                .map(SchemaType::from_tag)
                .unwrap_or_else(|| ArrayItem::default().item_type),
            enum_values: map.get("enum").map(enum_strings).unwrap_or_default(),
        },
        _ => ArrayItem::default(),
    }
}

fn enum_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_patterns(path: &str, value: Option<&Value>) -> Result<Vec<Regex>> {
    let sources: Vec<&str> = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(other) => {
            return Err(Error::Schema(format!(
                "field '{}' has an invalid match rule: {}",
                path, other
            )))
        }
    };

    sources
        .into_iter()
        .map(|source| {
            Regex::new(source).map_err(|e| Error::Pattern {
                field: path.to_string(),
                source: e,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ARTICLE: &str = r#"
name: article
fields:
  title:
    type: string
    required: true
    match: "^[A-Z]"
  status:
    type: string
    enum: [draft, published]
    default: draft
  price:
    type: number
    min: 0
    max: 100
    step: 0.5
  tags:
    type: array
    items:
      type: string
      enum: [news, blog]
  author:
    label: Author
    name:
      type: string
      label: Author name
    email: string
"#;

    #[test]
    fn test_fields_keep_document_order() {
        let schema = ModelSchema::from_yaml(ARTICLE).unwrap();
        let paths: Vec<&str> = schema.fields().iter().map(|f| f.path()).collect();
        assert_eq!(
            paths,
            vec!["title", "status", "price", "tags", "author.name", "author.email"]
        );
        assert_eq!(schema.name, "article");
    }

    #[test]
    fn test_field_attributes() {
        let schema = ModelSchema::from_yaml(ARTICLE).unwrap();

        let title = schema.field("title").unwrap();
        assert!(title.is_required());
        assert_eq!(title.patterns(), vec!["^[A-Z]"]);

        let status = schema.field("status").unwrap();
        assert_eq!(status.enum_values(), ["draft", "published"]);
        assert_eq!(status.default_value(), Some(&Value::String("draft".into())));

        let price = schema.field("price").unwrap();
        assert_eq!(price.numeric_constraints().max, Some(100.0));
        assert_eq!(price.numeric_constraints().step, Some(0.5));

        let tags = schema.field("tags").unwrap();
        match tags.schema_type() {
            SchemaType::Array(item) => {
                assert_eq!(item.item_type, SchemaType::String);
                assert_eq!(item.enum_values, vec!["news", "blog"]);
            }
            other => panic!("expected array, got {}", other),
        }
    }

    #[test]
    fn test_nested_label_lookup() {
        let schema = ModelSchema::from_yaml(ARTICLE).unwrap();
        assert_eq!(schema.label_for("author.name"), Some("Author name".to_string()));
        assert_eq!(schema.label_for("author.email"), None);
        assert_eq!(schema.label_for("title"), None);
        assert_eq!(schema.label_for("nope.deeper"), None);
    }

    #[test]
    fn test_array_shorthand_without_enum() {
        let schema = ModelSchema::from_json(r#"{"fields": {"codes": {"type": [{}]}}}"#).unwrap();
        match schema.field("codes").unwrap().schema_type() {
            SchemaType::Array(item) => assert!(item.enum_values.is_empty()),
            other => panic!("expected array, got {}", other),
        }
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = ModelSchema::from_yaml("fields:\n  code: { type: string, match: '(' }\n").unwrap_err();
        assert!(matches!(err, Error::Pattern { ref field, .. } if field == "code"));
    }

    #[test]
    fn test_missing_fields_is_rejected() {
        let err = ModelSchema::from_yaml("name: empty\n").unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_load_by_extension() -> Result<()> {
        let temp = TempDir::new()?;
        let yaml = temp.path().join("article.yaml");
        let json = temp.path().join("article.json");
        fs::write(&yaml, ARTICLE)?;
        fs::write(&json, r#"{"name": "page", "fields": {"slug": {"type": "string"}}}"#)?;

        assert_eq!(ModelSchema::load(&yaml)?.len(), 6);
        let page = ModelSchema::load(&json)?;
        assert_eq!(page.name, "page");
        assert_eq!(page.len(), 1);
        Ok(())
    }
}
