//! keys, values and pairs - ordered listings of the document root

use crate::document;
use crate::output::Output;
use anyhow::Result;
use satchel_core::Value;
use std::path::Path;

pub fn keys(file: &Path, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    let keys: Vec<Value> = map.keys().into_iter().map(Value::from).collect();
    out.print(&keys)
}

pub fn values(file: &Path, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    out.print(&map.values())
}

/// Each entry as a two-element `[key, value]` array
pub fn pairs(file: &Path, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    let mut pairs = Vec::with_capacity(map.len());
    map.each_pair(|k, v| pairs.push(Value::array(vec![k.to_value(), v.clone()])));
    out.print(&pairs)
}
