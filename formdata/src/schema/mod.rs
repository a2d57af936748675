//! Schema capabilities consumed by the form builder.
//!
//! The builder never inspects a concrete schema shape. Any provider that can
//! answer the questions below (type, required flag, enumeration, default,
//! patterns, numeric bounds, label overrides) can drive it.

pub mod document;
pub mod types;

pub use document::{DocumentField, ModelSchema};
pub use types::{ArrayItem, NumericConstraints, SchemaType};

use serde_json::Value;

/// One field of a model schema
pub trait SchemaField {
    /// Full field path; nested fields use dotted paths (`author.name`)
    fn path(&self) -> &str;

    fn schema_type(&self) -> &SchemaType;

    fn is_required(&self) -> bool {
        false
    }

    fn enum_values(&self) -> &[String] {
        &[]
    }

    fn default_value(&self) -> Option<&Value> {
        None
    }

    /// Regex sources of the field's match rules, in declaration order
    fn patterns(&self) -> Vec<&str> {
        Vec::new()
    }

    fn numeric_constraints(&self) -> NumericConstraints {
        NumericConstraints::default()
    }
}

/// A model schema: an ordered set of fields plus label overrides
pub trait SchemaSource {
    type Field: SchemaField;

    /// Fields in schema order
    fn fields(&self) -> Vec<&Self::Field>;

    /// Explicit label for a field path, if the schema declares one
    fn label_for(&self, _path: &str) -> Option<String> {
        None
    }
}
