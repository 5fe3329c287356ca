//! Document loading and argument parsing

use anyhow::{Context, Result};
use satchel_core::{Key, Map, Value};
use std::fs;
use std::path::Path;

/// Load a `.toml` file as TOML, anything else as JSON
pub fn load(path: &Path) -> Result<Map> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let map = if is_toml {
        Map::from_toml_str(&source)
    } else {
        Map::from_json_str(&source)
    };
    map.with_context(|| format!("Failed to parse document: {}", path.display()))
}

/// `42` is a number, `:name` a symbol, anything else a string
pub fn parse_segment(raw: &str) -> Key {
    if let Some(name) = raw.strip_prefix(':').filter(|n| !n.is_empty()) {
        return Key::symbol(name);
    }
    match raw.parse::<i64>() {
        Ok(n) => Key::from(n),
        Err(_) => Key::from(raw),
    }
}

/// JSON literal if it parses as one, else the raw text as a string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from_json)
        .unwrap_or_else(|_| Value::string(raw))
}
