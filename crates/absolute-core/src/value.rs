//! Scalar value type held by the density store

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar state value
///
/// Serialized untagged, so a trace of `Int(1)` reads as plain `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null (a defined state whose value is null)
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get this value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Add two values
    ///
    /// Integers add exactly and widen to float on overflow, mixed numeric
    /// operands add as floats, and strings concatenate. Any other pairing
    /// returns `None`, which converts into a held transition.
    pub fn checked_add(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(
                a.checked_add(*b)
                    .map(Value::Int)
                    .unwrap_or(Value::Float(*a as f64 + *b as f64)),
            ),
            (Value::String(a), Value::String(b)) => Some(Value::String(format!("{}{}", a, b))),
            (a, b) => Some(Value::Float(a.as_float()? + b.as_float()?)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Int(42).as_float(), Some(42.0));
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Int(1).type_name(), "int");
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Value::Int(1).checked_add(&Value::Int(2)), Some(Value::Int(3)));
        assert_eq!(
            Value::Int(1).checked_add(&Value::Float(0.5)),
            Some(Value::Float(1.5))
        );
        assert_eq!(
            Value::from("ab").checked_add(&Value::from("cd")),
            Some(Value::from("abcd"))
        );
        assert_eq!(Value::Bool(true).checked_add(&Value::Int(1)), None);
        assert_eq!(Value::Null.checked_add(&Value::Int(1)), None);
    }

    #[test]
    fn test_checked_add_overflow_widens() {
        let sum = Value::Int(i64::MAX).checked_add(&Value::Int(1)).unwrap();
        assert_eq!(sum.type_name(), "float");
    }

    #[test]
    fn test_untagged_serde() {
        let json = serde_json::to_string(&Value::Int(1)).unwrap();
        assert_eq!(json, "1");
        let back: Value = serde_json::from_str("2.5").unwrap();
        assert_eq!(back, Value::Float(2.5));
        let back: Value = serde_json::from_str("7").unwrap();
        assert_eq!(back, Value::Int(7));
        let back: Value = serde_json::from_str("null").unwrap();
        assert_eq!(back, Value::Null);
    }
}
