//! Example values supplied for form fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A field value. Strings always deserialize as `Text` so the source text
/// survives; RFC 3339 text is only treated as a date when inferring a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(Number),
    Text(String),
    Date(DateTime<Utc>),
    /// Arrays, objects and null
    Json(Value),
}

impl FieldValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Dates, and text holding an RFC 3339 timestamp
    pub fn is_date_like(&self) -> bool {
        match self {
            Self::Date(_) => true,
            Self::Text(s) => DateTime::parse_from_rfc3339(s).is_ok(),
            _ => false,
        }
    }

    /// Loose truthiness: false, zero, NaN, empty text and null are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            Self::Date(_) => true,
            Self::Text(s) => !s.is_empty(),
            Self::Json(v) => !v.is_null(),
        }
    }

    /// `1` for truthy values, `0` otherwise
    pub fn to_flag(&self) -> Self {
        Self::Number(Number::from(u8::from(self.is_truthy())))
    }

    /// JSON text of the value, for plain text inputs
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Self::Number).unwrap_or(Self::Json(Value::Null))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_date_like_keeps_source_text() {
        let v = FieldValue::from_json(json!("2015-03-01T10:00:00+02:00"));
        assert_eq!(v, FieldValue::Text("2015-03-01T10:00:00+02:00".to_string()));
        assert!(v.is_date_like());

        let v: FieldValue = serde_json::from_value(json!("2015-03-01T10:00:00+02:00")).unwrap();
        assert!(v.is_text());

        assert!(FieldValue::Date(Utc.with_ymd_and_hms(2015, 3, 1, 10, 0, 0).unwrap()).is_date_like());
        assert!(!FieldValue::from_json(json!("March")).is_date_like());
        assert!(!FieldValue::from(20150301i64).is_date_like());
    }

    #[test]
    fn test_truthiness() {
        assert!(FieldValue::from(true).is_truthy());
        assert!(!FieldValue::from(0i64).is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(!FieldValue::Json(Value::Null).is_truthy());
        assert!(FieldValue::Json(json!([])).is_truthy());
    }

    #[test]
    fn test_to_flag() {
        assert_eq!(FieldValue::from(true).to_flag(), FieldValue::from(1i64));
        assert_eq!(FieldValue::from(false).to_flag(), FieldValue::from(0i64));
        assert_eq!(serde_json::to_value(FieldValue::from("x").to_flag()).unwrap(), json!(1));
    }

    #[test]
    fn test_json_string() {
        assert_eq!(FieldValue::from_json(json!(["a", 1])).to_json_string(), r#"["a",1]"#);
        assert_eq!(FieldValue::from(42i64).to_json_string(), "42");
        assert_eq!(FieldValue::Json(Value::Null).to_json_string(), "null");
    }
}
