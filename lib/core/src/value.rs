//! Tagged field values
//!
//! Extracted and ground-truth payloads are loosely shaped: a field may be
//! missing or null, a plain string, or a nested mapping (for example a
//! location split into street and city). [`FieldValue`] makes that shape
//! explicit so downstream code matches on the tag instead of probing JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single field value as it appears in a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    /// Missing key or JSON null
    #[default]
    Absent,
    /// A plain value; numbers and booleans keep their JSON text
    Scalar(String),
    /// A nested mapping, entries kept in source order
    Composite(Vec<(String, FieldValue)>),
}

impl FieldValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        FieldValue::Scalar(value.into())
    }

    /// Render the value as plain text.
    ///
    /// Composite values join their non-empty members with a single space,
    /// in mapping order.
    pub fn flatten(&self) -> String {
        match self {
            FieldValue::Absent => String::new(),
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::Composite(entries) => entries
                .iter()
                .map(|(_, v)| v.flatten())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// True when there is nothing to compare
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::Composite(entries) => entries.iter().all(|(_, v)| v.is_empty()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => write!(f, "null"),
            FieldValue::Scalar(s) => write!(f, "{}", s),
            FieldValue::Composite(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::Bool(b) => FieldValue::Scalar(b.to_string()),
            Value::Number(n) => FieldValue::Scalar(n.to_string()),
            Value::String(s) => FieldValue::Scalar(s),
            Value::Array(items) => FieldValue::Composite(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), FieldValue::from(v)))
                    .collect(),
            ),
            Value::Object(map) => FieldValue::Composite(
                map.into_iter().map(|(k, v)| (k, FieldValue::from(v))).collect(),
            ),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Absent => Value::Null,
            FieldValue::Scalar(s) => Value::String(s),
            FieldValue::Composite(entries) => Value::Object(
                entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}
