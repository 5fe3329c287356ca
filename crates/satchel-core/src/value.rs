//! Dynamic value representation
//!
//! - Null, Bool, Int, Number: immediate values
//! - String, Symbol: reference-counted, immutable
//! - Array: copy-on-write (`ValueArray` wrapping `Arc<Vec<Value>>`)
//! - Map: copy-on-write (`ValueMap` wrapping `Arc<Map>`)
//!
//! Cloning any value is cheap. Mutating a shared array or map clones the
//! inner storage first, so clones never observe each other's changes.

use crate::key::Key;
use crate::map::Map;
use std::fmt;
use std::sync::Arc;

/// Copy-on-write array. Cheap to clone (refcount bump).
/// Mutations on a shared array clone the inner Vec first (Arc::make_mut).
#[derive(Clone, Debug, Default)]
pub struct ValueArray(Arc<Vec<Value>>);

impl ValueArray {
    pub fn from_vec(v: Vec<Value>) -> Self {
        ValueArray(Arc::new(v))
    }

    /// Read access without cloning.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element by signed position; negative positions count from the end.
    pub fn get_signed(&self, index: i64) -> Option<&Value> {
        let resolved = if index < 0 {
            let back = usize::try_from(index.unsigned_abs()).ok()?;
            self.0.len().checked_sub(back)?
        } else {
            usize::try_from(index).ok()?
        };
        self.0.get(resolved)
    }

    pub fn push(&mut self, value: Value) {
        Arc::make_mut(&mut self.0).push(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

impl From<Vec<Value>> for ValueArray {
    fn from(v: Vec<Value>) -> Self {
        ValueArray::from_vec(v)
    }
}

impl FromIterator<Value> for ValueArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueArray(Arc::new(iter.into_iter().collect()))
    }
}

/// Copy-on-write wrapper for a nested [`Map`]
#[derive(Clone, Debug, Default)]
pub struct ValueMap(Arc<Map>);

impl ValueMap {
    pub fn from_map(map: Map) -> Self {
        ValueMap(Arc::new(map))
    }

    pub fn inner(&self) -> &Map {
        &self.0
    }

    pub fn inner_mut(&mut self) -> &mut Map {
        Arc::make_mut(&mut self.0)
    }

    pub fn into_inner(self) -> Map {
        Arc::try_unwrap(self.0).unwrap_or_else(|arc| (*arc).clone())
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

/// Runtime value type
#[derive(Clone)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Exact integer value
    Int(i64),
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// String value (reference-counted, immutable)
    String(Arc<String>),
    /// Symbol value (interned-style name, distinct from strings)
    Symbol(Arc<str>),
    /// Ordered sequence (copy-on-write)
    Array(ValueArray),
    /// Nested map (copy-on-write)
    Map(ValueMap),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a new symbol value
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Value::Symbol(Arc::from(name.as_ref()))
    }

    /// Create a new array value
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(ValueArray::from_vec(values))
    }

    /// Wrap a map as a value
    pub fn map(map: Map) -> Self {
        Value::Map(ValueMap::from_map(map))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value as f64; integers beyond 2^53 lose precision
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Exact integer value, including whole floats that fit in an i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Number(n) => exact_int(*n),
            _ => None,
        }
    }

    /// String contents; symbols are not strings and return `None`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ValueArray> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map.inner()),
            _ => None,
        }
    }

    /// Mutable access to a nested map (copy-on-write if shared)
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map.inner_mut()),
            _ => None,
        }
    }

    /// Literal form: strings quoted, symbols prefixed with `:`
    pub fn inspect(&self) -> String {
        match self {
            Value::String(s) => format!("{:?}", s.as_str()),
            Value::Symbol(s) => format!(":{}", s),
            Value::Array(arr) => {
                let elements: Vec<String> = arr.iter().map(|v| v.inspect()).collect();
                format!("[{}]", elements.join(", "))
            }
            other => other.to_string(),
        }
    }
}

/// Lower bound of the i64 range as an exactly representable f64
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

/// `n` as an i64 when it is whole and inside the i64 range
pub(crate) fn exact_int(n: f64) -> Option<i64> {
    // i64::MAX is not representable, so the upper bound is exclusive
    if n.is_finite() && n.fract() == 0.0 && n >= I64_MIN_F64 && n < -I64_MIN_F64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Format a number without a trailing `.0` for whole values
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl PartialEq for Value {
    /// Content equality. Maps compare entries regardless of order and ignore
    /// default resolvers. Strings and symbols with the same text differ.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Int(i), Value::Number(n)) | (Value::Number(n), Value::Int(i)) => {
                exact_int(*n) == Some(*i)
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s.as_str()),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Array(_) => write!(f, "{}", self.inspect()),
            Value::Map(map) => write!(f, "{}", map.inner()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s.as_str()),
            Value::Symbol(s) => write!(f, "Symbol({})", s),
            Value::Array(arr) => write!(f, "Array({:?})", arr.as_slice()),
            Value::Map(map) => write!(f, "Map({:?})", map.inner()),
        }
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Number(n as f64), Value::Int)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::new(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::array(values)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::map(map)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        key.to_value()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
