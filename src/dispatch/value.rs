//! Tagged call values.

use std::fmt;

use crate::buffer::HostArray;

/// A dynamically typed argument or result at the call boundary
#[derive(Debug, Clone)]
pub enum Value {
    /// No value
    None,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    Str(String),
    /// Array handle
    Array(HostArray),
}

impl Value {
    /// Name of the variant as the host would print it
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Array(_) => "ndarray",
        }
    }

    /// Whether this is [`Value::None`]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Integer payload
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Array payload
    pub fn as_array(&self) -> Option<&HostArray> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Parse a command-line token: integer, then float, then `True`/`False`,
    /// `None`, and finally a plain string
    pub fn parse_literal(token: &str) -> Value {
        if let Ok(v) = token.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = token.parse::<f64>() {
            return Value::Float(v);
        }
        match token {
            "True" | "true" => Value::Bool(true),
            "False" | "false" => Value::Bool(false),
            "None" => Value::None,
            _ => Value::Str(token.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Str(v) => write!(f, "'{}'", v),
            Value::Array(v) => write!(f, "{}", v),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<HostArray> for Value {
    fn from(v: HostArray) -> Self {
        Value::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_prefers_int_then_float() {
        assert_eq!(Value::parse_literal("3").as_int(), Some(3));
        assert_eq!(Value::parse_literal("3.5").as_float(), Some(3.5));
        assert_eq!(Value::parse_literal("True").as_bool(), Some(true));
        assert!(Value::parse_literal("None").is_none());
        assert_eq!(Value::parse_literal("Jo").as_str(), Some("Jo"));
    }

    #[test]
    fn display_matches_host_repr() {
        assert_eq!(Value::Float(6.0).to_string(), "6.0");
        assert_eq!(Value::from("World").to_string(), "'World'");
        assert_eq!(Value::from(false).to_string(), "False");
    }
}
