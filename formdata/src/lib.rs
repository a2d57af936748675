//! formdata: derive form field descriptors for UI renderers
//!
//! Descriptors come from a model schema (any [`SchemaSource`]), from example
//! values, or from both layered in that order:
//!
//! ```
//! use formdata::{FieldValue, FormData, ModelSchema};
//!
//! let schema = ModelSchema::from_yaml(r#"
//! fields:
//!   title: { type: string, required: true }
//!   isPublic: { type: boolean }
//! "#).unwrap();
//!
//! let mut form = FormData::new();
//! form.model(&schema).values([("title", FieldValue::from("Hello"))]);
//!
//! let fields = form.get(Some("title isPublic:checkbox"));
//! assert_eq!(fields.len(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod label;
pub mod logging;
pub mod schema;
pub mod value;

pub use builder::FormData;
pub use config::{Config, FormOptions, LoggingConfig};
pub use descriptor::{FieldDescriptor, FieldSlot, InputType, SelectOption};
pub use error::{Error, Result};
pub use schema::{
    ArrayItem, DocumentField, ModelSchema, NumericConstraints, SchemaField, SchemaSource,
    SchemaType,
};
pub use value::FieldValue;
