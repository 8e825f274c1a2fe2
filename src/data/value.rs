//! Dynamically typed field values.

use std::fmt;

use serde_json::Value as Json;

/// A concrete field value as seen by `get`/`set` and the store.
///
/// This is the common currency between typed field definitions, the UI
/// editors, and the persisted JSON map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value (text, textarea, and choice fields).
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    Uint(u64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value (checkbox fields).
    Bool(bool),
}

impl Value {
    /// Short name of the value's type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "number",
            Value::Bool(_) => "boolean",
        }
    }

    /// Convert into the persisted JSON representation.
    pub fn as_json(&self) -> Json {
        match self {
            Value::Str(s) => Json::String(s.clone()),
            Value::Int(i) => Json::Number((*i).into()),
            Value::Uint(u) => Json::Number((*u).into()),
            Value::Float(f) => Json::Number(
                serde_json::Number::from_f64(*f).unwrap_or_else(|| serde_json::Number::from(0)),
            ),
            Value::Bool(b) => Json::Bool(*b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_representation() {
        assert_eq!(Value::Str("a".into()).as_json(), Json::String("a".into()));
        assert_eq!(Value::Int(-3).as_json(), serde_json::json!(-3));
        assert_eq!(Value::Uint(7).as_json(), serde_json::json!(7));
        assert_eq!(Value::Bool(true).as_json(), Json::Bool(true));
        assert_eq!(Value::Float(1.5).as_json(), serde_json::json!(1.5));
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::from(1i64).kind(), "integer");
        assert_eq!(Value::from(1u64).kind(), "unsigned integer");
        assert_eq!(Value::from(1.0).kind(), "number");
        assert_eq!(Value::from(false).kind(), "boolean");
    }
}
