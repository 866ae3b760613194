//! Parameter values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single selectable parameter value.
///
/// Numeric values are `f64`; their canonical key representation is produced
/// by the encoder in `ifig-core`, never by `Display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Numeric(f64),
    Text(String),
}

impl Value {
    /// Returns the numeric payload, if any.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Returns the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Numeric(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Numeric(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
