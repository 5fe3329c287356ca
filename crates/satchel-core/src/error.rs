//! Error type for map operations

use crate::key::Key;
use thiserror::Error;

/// Errors raised by the strict map operations.
///
/// Lookups that are allowed to miss (`get`, `delete`, `dig` on an absent key)
/// return `None` instead of one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    /// `fetch` on an absent key with no default and no callback
    #[error("key not found: {}", .key.inspect())]
    KeyNotFound { key: Key },
    /// Arrays and maps cannot be used as keys
    #[error("Cannot hash type {type_name} - only null, bool, number, string, symbol are hashable")]
    UnhashableType { type_name: String },
    /// `dig` reached a scalar while path segments remained
    #[error("{type_name} does not support dig (remaining segment {})", .segment.inspect())]
    NotDiggable { type_name: String, segment: Key },
    /// `dig` tried to index an array with a non-integer segment
    #[error("Invalid index: array segments must be integers, got {}", .segment.inspect())]
    InvalidIndex { segment: Key },
    /// `dig` called with no segments
    #[error("dig requires at least one path segment")]
    EmptyPath,
    /// JSON or TOML input that cannot become a map
    #[error("Invalid document: {msg}")]
    InvalidDocument { msg: String },
    /// Two keys of one map would become the same JSON object key
    #[error("key {} collides with another key as JSON object key {json_key:?}", .key.inspect())]
    DuplicateJsonKey { key: Key, json_key: String },
}

/// Result type for map operations
pub type MapResult<T> = Result<T, MapError>;
