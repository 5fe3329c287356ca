//! JSON and TOML conversion
//!
//! Object and table key order is preserved (`preserve_order` on both
//! `serde_json` and `toml`), so a document's field order becomes the map's
//! iteration order. Document keys are always strings.
//!
//! Writing a map back out uses each key's display form as the JSON object
//! key. Keys whose display forms coincide (`:a` and `"a"`, `1` and `"1"`)
//! cannot share one object, so conversion fails with
//! [`MapError::DuplicateJsonKey`] instead of dropping or repeating entries.

use crate::error::{MapError, MapResult};
use crate::key::Key;
use crate::map::Map;
use crate::value::Value;
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

/// Largest magnitude below which a whole f64 is emitted as an integer
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn as_integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INT {
        Some(n as i64)
    } else {
        None
    }
}

impl Value {
    /// Convert a parsed JSON document
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(obj) => Value::map(
                obj.into_iter()
                    .map(|(k, v)| (Key::from(k), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to JSON. Symbols become strings, non-finite numbers become null,
    /// and map keys use their display form.
    pub fn to_json(&self) -> MapResult<serde_json::Value> {
        let json = match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Number(n) => match as_integral(*n) {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::String(s) => serde_json::Value::String(s.as_str().to_string()),
            Value::Symbol(s) => serde_json::Value::String(s.to_string()),
            Value::Array(arr) => serde_json::Value::Array(
                arr.iter().map(Value::to_json).collect::<MapResult<_>>()?,
            ),
            Value::Map(map) => map.inner().to_json()?,
        };
        Ok(json)
    }

    /// Convert a parsed TOML value; datetimes become strings
    pub fn from_toml(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::from(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Number(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::string(dt.to_string()),
            toml::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from_toml).collect())
            }
            toml::Value::Table(table) => Value::map(map_from_table(table)),
        }
    }
}

fn map_from_table(table: toml::Table) -> Map {
    table
        .into_iter()
        .map(|(k, v)| (Key::from(k), Value::from_toml(v)))
        .collect()
}

impl Map {
    /// Parse a JSON document whose root is an object
    pub fn from_json_str(source: &str) -> MapResult<Self> {
        let parsed: serde_json::Value =
            serde_json::from_str(source).map_err(|e| MapError::InvalidDocument {
                msg: format!("Invalid JSON: {}", e),
            })?;
        match Value::from_json(parsed) {
            Value::Map(map) => Ok(map.into_inner()),
            other => Err(MapError::InvalidDocument {
                msg: format!("document root must be an object, got {}", other.type_name()),
            }),
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> MapResult<Self> {
        let table: toml::Table = toml::from_str(source).map_err(|e| MapError::InvalidDocument {
            msg: format!("Invalid TOML: {}", e),
        })?;
        Ok(map_from_table(table))
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> MapResult<serde_json::Value> {
        let mut object = serde_json::Map::with_capacity(self.len());
        for (key, value) in self.iter() {
            let json_key = key.to_string();
            if object.contains_key(&json_key) {
                return Err(MapError::DuplicateJsonKey {
                    key: key.clone(),
                    json_key,
                });
            }
            object.insert(json_key, value.to_json()?);
        }
        Ok(serde_json::Value::Object(object))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Number(n) => match as_integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Symbol(s) => serializer.serialize_str(s),
            Value::Array(arr) => serializer.collect_seq(arr.iter()),
            Value::Map(map) => map.inner().serialize(serializer),
        }
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seen = HashSet::with_capacity(self.len());
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            let json_key = key.to_string();
            if seen.contains(&json_key) {
                return Err(S::Error::custom(MapError::DuplicateJsonKey {
                    key: key.clone(),
                    json_key,
                }));
            }
            state.serialize_entry(&json_key, value)?;
            seen.insert(json_key);
        }
        state.end()
    }
}

impl Serialize for Key {
    /// Keys serialize by display form so any key is a valid JSON object key
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
