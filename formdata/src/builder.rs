//! Form field descriptor builder.
//!
//! ```
//! use formdata::{FormData, ModelSchema};
//!
//! let schema = ModelSchema::from_yaml(r#"
//! fields:
//!   title: { type: string, required: true }
//!   slug: { type: string }
//! "#).unwrap();
//!
//! let mut form = FormData::new();
//! form.model(&schema);
//! assert_eq!(form.get(None).len(), 2);
//! assert_eq!(form.get_required().len(), 1);
//! ```

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::FormOptions;
use crate::descriptor::{FieldDescriptor, FieldSlot, InputType, SelectOption};
use crate::label;
use crate::schema::{NumericConstraints, SchemaField, SchemaSource, SchemaType};
use crate::value::FieldValue;
use crate::Result;

static PASSWORD_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.?password$").expect("valid regex"));

/// Collects field descriptors from a model schema and/or example values.
///
/// Descriptors are keyed by field name and listed in the order fields were
/// first registered. `get` and `get_required` never modify stored state.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    options: FormOptions,
    fields: IndexMap<String, FieldDescriptor>,
    /// Schema type of every field registered through `model`
    model_types: HashMap<String, SchemaType>,
}

/// Schema attributes that drive widget selection
struct TypeSource<'a> {
    schema_type: &'a SchemaType,
    enum_values: &'a [String],
    default: Option<&'a Value>,
    constraints: NumericConstraints,
    /// Absent for array elements
    path: Option<&'a str>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormOptions) -> Self {
        Self {
            options: options.normalized(),
            ..Default::default()
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Create or update descriptors for every field of `schema`
    pub fn model<S: SchemaSource>(&mut self, schema: &S) -> &mut Self {
        for field in schema.fields() {
            let path = field.path();
            let descriptor = self
                .fields
                .entry(path.to_string())
                .or_insert_with(|| FieldDescriptor::new(path));

            descriptor.required = field.is_required();
            if let Some(pattern) = field.patterns().first() {
                descriptor.pattern = Some(pattern.to_string());
            }
            descriptor.name = path.to_string();
            descriptor.label = schema
                .label_for(path)
                .unwrap_or_else(|| label::from_path(path));

            let source = TypeSource {
                schema_type: field.schema_type(),
                enum_values: field.enum_values(),
                default: field.default_value(),
                constraints: field.numeric_constraints(),
                path: Some(path),
            };
            resolve_type(descriptor, &source, self.options.select_min_items);

            tracing::debug!(
                field = %path,
                schema_type = %field.schema_type(),
                input_type = ?descriptor.input_type().map(InputType::as_str),
                "resolved schema field"
            );

            self.model_types
                .insert(path.to_string(), field.schema_type().clone());
        }
        self
    }

    /// Create or update descriptors from example values, inferring a widget
    /// for fields the schema did not describe
    pub fn values<I, K, V>(&mut self, data: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        for (name, value) in data {
            let name = name.into();
            let descriptor = self
                .fields
                .entry(name.clone())
                .or_insert_with(|| FieldDescriptor::new(name.as_str()));

            if descriptor.label.is_empty() {
                descriptor.label = label::title_case(&name);
            }

            let value = value.into();
            if descriptor.input_type.is_none() {
                match &value {
                    FieldValue::Number(_) => descriptor.input_type = Some(InputType::Number),
                    v if v.is_date_like() => descriptor.input_type = Some(InputType::DateTime),
                    FieldValue::Bool(_) => {
                        descriptor.input_type = Some(InputType::Radio);
                        descriptor.options = Some(SelectOption::yes_no());
                    }
                    FieldValue::Date(_) | FieldValue::Text(_) | FieldValue::Json(_) => {
                        descriptor.input_type = Some(InputType::Text)
                    }
                }
            }

            let textual = descriptor.input_type().is_some_and(InputType::is_textual);
            descriptor.value = if textual && !value.is_text() {
                Some(FieldValue::Text(value.to_json_string()))
            } else {
                Some(value)
            };

            tracing::debug!(field = %name, "applied field value");
            descriptor.name = name;
        }
        self
    }

    /// `values` for a JSON object. Anything other than an object is ignored.
    /// RFC 3339 strings make value-only fields `datetime` but stay as given.
    pub fn values_json(&mut self, data: &Value) -> &mut Self {
        match data.as_object() {
            Some(map) => self.values(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from_json(v.clone()))),
            ),
            None => {
                tracing::warn!("Ignoring non-object field values: {}", data);
                self
            }
        }
    }

    /// Descriptors for a space-separated field list. Each token is `name` or
    /// `name:type`, where `type` overrides the widget for this call only.
    /// Without a list, all fields are returned, skipping `_`-prefixed names
    /// unless `show_private` is set. Unknown names yield a `Missing` slot.
    pub fn get(&self, fields: Option<&str>) -> Vec<FieldSlot> {
        match fields.filter(|f| !f.trim().is_empty()) {
            Some(spec) => spec
                .split_whitespace()
                .map(|token| self.resolve_slot(token))
                .collect(),
            None => self
                .fields
                .keys()
                .filter(|name| self.options.show_private || !name.starts_with('_'))
                .map(|name| self.resolve_slot(name))
                .collect(),
        }
    }

    /// Descriptors of all listed fields marked as required, in listing order
    pub fn get_required(&self) -> Vec<FieldSlot> {
        self.get(None)
            .into_iter()
            .filter(FieldSlot::is_required)
            .collect()
    }

    /// `get` rendered as a JSON array
    pub fn to_json(&self, fields: Option<&str>) -> Result<Value> {
        Ok(serde_json::to_value(self.get(fields))?)
    }

    /// Stored descriptor of a field, as registered
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn resolve_slot(&self, token: &str) -> FieldSlot {
        let mut parts = token.split(':');
        let name = parts.next().unwrap_or_default();
        let override_type = parts.next().filter(|t| !t.is_empty());

        let Some(stored) = self.fields.get(name) else {
            tracing::warn!("Requested unknown field '{}'", name);
            return FieldSlot::missing(name);
        };

        let mut descriptor = stored.clone();
        let boolean_model = self
            .model_types
            .get(name)
            .is_some_and(SchemaType::is_boolean);

        if boolean_model {
            descriptor.value = descriptor.value.as_ref().map(FieldValue::to_flag);
        }

        if let Some(override_type) = override_type {
            let input_type = InputType::from_name(override_type);
            if input_type == InputType::Checkbox && boolean_model {
                descriptor.options = Some(vec![SelectOption {
                    label: std::mem::take(&mut descriptor.label),
                    name: Some(name.to_string()),
                    value: Value::from(1),
                }]);
            }
            descriptor.input_type = Some(input_type);
        }

        FieldSlot::Field(descriptor)
    }
}

/// Pick the widget for a schema type, first matching rule wins
fn resolve_type(descriptor: &mut FieldDescriptor, source: &TypeSource<'_>, select_min_items: usize) {
    match source.schema_type {
        SchemaType::Boolean => {
            descriptor.input_type = Some(InputType::Radio);
            descriptor.options = Some(SelectOption::yes_no());
        }
        SchemaType::Number => {
            descriptor.input_type = Some(InputType::Number);
            descriptor.min = source.constraints.min;
            descriptor.max = source.constraints.max;
            descriptor.step = source.constraints.step;
        }
        SchemaType::Date => descriptor.input_type = Some(InputType::DateTime),
        SchemaType::String if !source.enum_values.is_empty() => {
            descriptor.input_type = Some(if source.enum_values.len() < select_min_items {
                InputType::Radio
            } else {
                InputType::Select
            });
            descriptor.options = Some(SelectOption::from_enum(source.enum_values));
            if let Some(default) = source
                .default
                .map(|d| FieldValue::from_json(d.clone()))
                .filter(FieldValue::is_truthy)
            {
                descriptor.value = Some(default);
            }
        }
        SchemaType::Array(item) => {
            let element = TypeSource {
                schema_type: &item.item_type,
                enum_values: &item.enum_values,
                default: None,
                constraints: NumericConstraints::default(),
                path: None,
            };
            resolve_type(descriptor, &element, select_min_items);
        }
        SchemaType::String if source.path.is_some_and(|p| PASSWORD_PATH.is_match(p)) => {
            descriptor.input_type = Some(InputType::Password)
        }
        SchemaType::String | SchemaType::Unknown(_) => descriptor.input_type = Some(InputType::Text),
    }
}
