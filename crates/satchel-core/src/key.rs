//! Hashable map keys
//!
//! Only scalar values can be keys. Integers are stored exactly, and whole
//! floats that fit in an i64 fold into the same integer key, so `1` and
//! `1.0` are one key. Every NaN hashes alike and `-0.0` is the key `0`.

use crate::error::MapError;
use crate::value::{exact_int, format_number, Value};
use ordered_float::OrderedFloat;
use std::fmt;
use std::sync::Arc;

/// Map key: the hashable subset of [`Value`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Null key
    Null,
    /// Boolean key
    Bool(bool),
    /// Exact integer key
    Int(i64),
    /// Non-integral number key (fractions, infinities, NaN)
    Number(OrderedFloat<f64>),
    /// String key
    String(Arc<String>),
    /// Symbol key (distinct from a string with the same text)
    Symbol(Arc<str>),
}

impl Key {
    /// Create a number key. Whole values in the i64 range become [`Key::Int`],
    /// and every NaN becomes the same key.
    pub fn number(n: f64) -> Self {
        if let Some(i) = exact_int(n) {
            return Key::Int(i);
        }
        let normalized = if n.is_nan() { f64::NAN } else { n };
        Key::Number(OrderedFloat(normalized))
    }

    /// Create an integer key
    pub fn int(n: i64) -> Self {
        Key::Int(n)
    }

    /// Create a string key
    pub fn string(s: impl Into<String>) -> Self {
        Key::String(Arc::new(s.into()))
    }

    /// Create a symbol key
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Key::Symbol(Arc::from(name.as_ref()))
    }

    /// Convert the key back to a value
    pub fn to_value(&self) -> Value {
        match self {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(*b),
            Key::Int(i) => Value::Int(*i),
            Key::Number(n) => Value::Number(n.0),
            Key::String(s) => Value::String(Arc::clone(s)),
            Key::Symbol(s) => Value::Symbol(Arc::clone(s)),
        }
    }

    /// Integer position for array lookups, if this key is a whole number
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Literal form used in error messages: strings quoted, symbols prefixed with `:`
    pub fn inspect(&self) -> String {
        match self {
            Key::String(s) => format!("{:?}", s.as_str()),
            Key::Symbol(s) => format!(":{}", s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "null"),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Number(n) => write!(f, "{}", format_number(n.0)),
            Key::String(s) => write!(f, "{}", s.as_str()),
            Key::Symbol(s) => write!(f, "{}", s),
        }
    }
}

impl TryFrom<&Value> for Key {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Key::Null),
            Value::Bool(b) => Ok(Key::Bool(*b)),
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Number(n) => Ok(Key::number(*n)),
            Value::String(s) => Ok(Key::String(Arc::clone(s))),
            Value::Symbol(s) => Ok(Key::Symbol(Arc::clone(s))),
            Value::Array(_) | Value::Map(_) => Err(MapError::UnhashableType {
                type_name: value.type_name().to_string(),
            }),
        }
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::string(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(Arc::new(s))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Key::number(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(i64::from(n))
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Key::number(n as f64), Key::Int)
    }
}
