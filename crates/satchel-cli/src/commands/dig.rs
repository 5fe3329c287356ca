//! dig - nested lookup from the document root

use crate::document::{self, parse_segment};
use crate::output::Output;
use anyhow::Result;
use satchel_core::{DigPolicy, Value};
use std::path::Path;

pub fn run(file: &Path, segments: &[String], policy: DigPolicy, out: &Output) -> Result<()> {
    let map = document::load(file)?;
    let path = segments.iter().map(|s| parse_segment(s));
    let value = map.dig_with(path, policy)?.unwrap_or(Value::Null);
    out.print(&value)
}
