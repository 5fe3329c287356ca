//! get, fetch and has - single-key lookups on the document root

use crate::document::{self, parse_segment, parse_value};
use crate::output::Output;
use anyhow::Result;
use satchel_core::{Fallback, Value};
use std::path::Path;

/// Print the value bound to `key`, or null
pub fn get(file: &Path, key: &str, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    let value = map.get(parse_segment(key)).unwrap_or(Value::Null);
    out.print(&value)
}

/// Print the value bound to `key`, else `default`, else fail with `KeyNotFound`
pub fn fetch(file: &Path, key: &str, default: Option<&str>, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    let fallback = match default {
        Some(raw) => Fallback::default_value(parse_value(raw)),
        None => Fallback::none(),
    };
    let value = map.fetch_with(parse_segment(key), fallback)?;
    out.print(&value)
}

/// Print whether `needle` is a key (or, with `by_value`, a value) of the root
pub fn has(file: &Path, needle: &str, by_value: bool, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    let found = if by_value {
        map.contains_value(parse_value(needle))
    } else {
        map.contains_key(parse_segment(needle))
    };
    out.print(&found)
}
