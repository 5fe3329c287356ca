//! Nested lookup across maps and arrays
//!
//! A map step uses [`Map::get`], so default resolvers apply on every map the
//! walk passes through. An array step takes a whole-number index; negative
//! indices count from the end. A missing segment or a null intermediate ends
//! the walk with `None`.
//!
//! A scalar intermediate with segments still to go is governed by
//! [`DigPolicy`]: `Strict` raises, `Lenient` yields `None`.

use crate::error::{MapError, MapResult};
use crate::key::Key;
use crate::map::Map;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Handling of path segments that land on a non-container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigPolicy {
    /// Raise `NotDiggable` / `InvalidIndex`
    #[default]
    Strict,
    /// Yield `None`
    Lenient,
}

impl DigPolicy {
    fn reject(self, err: impl FnOnce() -> MapError) -> MapResult<Option<Value>> {
        match self {
            DigPolicy::Strict => Err(err()),
            DigPolicy::Lenient => Ok(None),
        }
    }
}

impl FromStr for DigPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(DigPolicy::Strict),
            "lenient" => Ok(DigPolicy::Lenient),
            other => Err(format!(
                "unknown dig policy '{}' (expected 'strict' or 'lenient')",
                other
            )),
        }
    }
}

impl Map {
    /// Walk `path` with [`DigPolicy::Strict`]
    pub fn dig<I, K>(&self, path: I) -> MapResult<Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.dig_with(path, DigPolicy::Strict)
    }

    pub fn dig_with<I, K>(&self, path: I, policy: DigPolicy) -> MapResult<Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let path = collect_path(path);
        let (head, rest) = path.split_first().ok_or(MapError::EmptyPath)?;
        walk(self.get(head), rest, policy)
    }
}

impl Value {
    /// Walk `path` starting at this value with [`DigPolicy::Strict`]
    pub fn dig<I, K>(&self, path: I) -> MapResult<Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.dig_with(path, DigPolicy::Strict)
    }

    pub fn dig_with<I, K>(&self, path: I, policy: DigPolicy) -> MapResult<Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let path = collect_path(path);
        let (head, rest) = path.split_first().ok_or(MapError::EmptyPath)?;
        walk(step(self, head, policy)?, rest, policy)
    }
}

fn collect_path<I, K>(path: I) -> Vec<Key>
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    path.into_iter().map(Into::into).collect()
}

fn walk(mut current: Option<Value>, rest: &[Key], policy: DigPolicy) -> MapResult<Option<Value>> {
    for (offset, segment) in rest.iter().enumerate() {
        let Some(value) = current else {
            // `rest` starts after the head segment
            debug!(depth = offset + 1, "dig stopped at a missing segment");
            return Ok(None);
        };
        current = step(&value, segment, policy)?;
    }
    Ok(current)
}

fn step(current: &Value, segment: &Key, policy: DigPolicy) -> MapResult<Option<Value>> {
    match current {
        Value::Map(map) => Ok(map.inner().get(segment)),
        Value::Array(arr) => match segment.as_index() {
            Some(index) => Ok(arr.get_signed(index).cloned()),
            None => policy.reject(|| MapError::InvalidIndex {
                segment: segment.clone(),
            }),
        },
        Value::Null => Ok(None),
        other => policy.reject(|| MapError::NotDiggable {
            type_name: other.type_name().to_string(),
            segment: segment.clone(),
        }),
    }
}
