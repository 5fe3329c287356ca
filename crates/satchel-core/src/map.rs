//! Insertion-ordered map with an optional default resolver
//!
//! Entries live in an [`IndexMap`]: overwriting a key keeps its position,
//! deleting a key closes the gap and keeps the relative order of the rest.

use crate::enumerator::Enumerator;
use crate::error::{MapError, MapResult};
use crate::key::Key;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// Function consulted on a missing key
pub type DefaultFn = Arc<dyn Fn(&Key) -> Value + Send + Sync>;

/// What a permissive lookup produces for an absent key
#[derive(Clone, Default)]
pub enum DefaultResolver {
    /// Absent keys yield `None`
    #[default]
    None,
    /// Absent keys yield a clone of this value
    Value(Value),
    /// Absent keys yield the function's result for that key
    Func(DefaultFn),
}

impl DefaultResolver {
    /// Resolve a missing key, or `None` when no resolver is configured
    pub fn resolve(&self, key: &Key) -> Option<Value> {
        match self {
            DefaultResolver::None => None,
            DefaultResolver::Value(v) => Some(v.clone()),
            DefaultResolver::Func(f) => Some(f(key)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DefaultResolver::None)
    }
}

impl fmt::Debug for DefaultResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultResolver::None => write!(f, "None"),
            DefaultResolver::Value(v) => write!(f, "Value({:?})", v),
            DefaultResolver::Func(_) => write!(f, "Func(<closure>)"),
        }
    }
}

/// Call-site fallbacks for [`Map::fetch_with`].
///
/// When both are supplied the callback wins and the default is ignored.
#[derive(Default)]
pub struct Fallback<'a> {
    default: Option<Value>,
    on_missing: Option<Box<dyn FnOnce(&Key) -> Value + 'a>>,
}

impl<'a> Fallback<'a> {
    /// No fallback: a miss is `KeyNotFound`
    pub fn none() -> Self {
        Self::default()
    }

    /// Return `value` on a miss
    pub fn default_value(value: impl Into<Value>) -> Self {
        Self::none().and_default(value)
    }

    /// Return `f(key)` on a miss
    pub fn on_missing(f: impl FnOnce(&Key) -> Value + 'a) -> Self {
        Self::none().and_on_missing(f)
    }

    pub fn and_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn and_on_missing(mut self, f: impl FnOnce(&Key) -> Value + 'a) -> Self {
        self.on_missing = Some(Box::new(f));
        self
    }
}

/// Ordered associative container
#[derive(Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    default: DefaultResolver,
}

impl Map {
    /// Create new empty map with no default resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Create map with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            default: DefaultResolver::None,
        }
    }

    /// Create an empty map whose absent keys resolve to `value`
    pub fn with_default(value: impl Into<Value>) -> Self {
        let mut map = Self::new();
        map.set_default(value);
        map
    }

    /// Create an empty map whose absent keys resolve through `f`
    pub fn with_default_fn<F>(f: F) -> Self
    where
        F: Fn(&Key) -> Value + Send + Sync + 'static,
    {
        let mut map = Self::new();
        map.set_default_fn(f);
        map
    }

    pub fn set_default(&mut self, value: impl Into<Value>) {
        self.default = DefaultResolver::Value(value.into());
    }

    pub fn set_default_fn<F>(&mut self, f: F)
    where
        F: Fn(&Key) -> Value + Send + Sync + 'static,
    {
        self.default = DefaultResolver::Func(Arc::new(f));
    }

    pub fn clear_default(&mut self) {
        self.default = DefaultResolver::None;
    }

    pub fn default_resolver(&self) -> &DefaultResolver {
        &self.default
    }

    /// Value bound to `key`, else the default resolver's value, else `None`
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        match self.entries.get(&key) {
            Some(value) => Some(value.clone()),
            None => self.resolve_missing(&key),
        }
    }

    /// Value bound to `key`; never consults the default resolver
    pub fn get_raw(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    fn resolve_missing(&self, key: &Key) -> Option<Value> {
        let resolved = self.default.resolve(key);
        if resolved.is_some() {
            trace!(key = %key.inspect(), "default resolver supplied value");
        }
        resolved
    }

    /// Bind `key` to `value`, returning the previous value if there was one.
    ///
    /// An existing key keeps its position; a new key goes last.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value if it was present
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into())
    }

    /// Value bound to `key`, or `KeyNotFound`
    pub fn fetch(&self, key: impl Into<Key>) -> MapResult<Value> {
        self.fetch_with(key, Fallback::none())
    }

    /// Value bound to `key`, or `default`
    pub fn fetch_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.entries
            .get(&key.into())
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Value bound to `key`, or `f(key)`
    pub fn fetch_or_else<F>(&self, key: impl Into<Key>, f: F) -> Value
    where
        F: FnOnce(&Key) -> Value,
    {
        let key = key.into();
        match self.entries.get(&key) {
            Some(value) => value.clone(),
            None => f(&key),
        }
    }

    /// Strict lookup with call-site fallbacks.
    ///
    /// Precedence: present value, then callback, then default, then
    /// `KeyNotFound`. The map's default resolver is never consulted.
    pub fn fetch_with(&self, key: impl Into<Key>, fallback: Fallback<'_>) -> MapResult<Value> {
        let key = key.into();
        let Fallback {
            default,
            on_missing,
        } = fallback;
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }
        if on_missing.is_some() && default.is_some() {
            warn!(key = %key.inspect(), "fetch callback supersedes default value argument");
        }
        match (on_missing, default) {
            (Some(f), _) => Ok(f(&key)),
            (None, Some(default)) => Ok(default),
            (None, None) => Err(MapError::KeyNotFound { key }),
        }
    }

    /// Fetch every key in order, failing on the first absent one
    pub fn fetch_values<I, K>(&self, keys: I) -> MapResult<Vec<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().map(|k| self.fetch(k)).collect()
    }

    /// `get` for every key in order
    pub fn values_at<I, K>(&self, keys: I) -> Vec<Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().map(|k| self.get(k)).collect()
    }

    /// Visit each entry in order; returns the map itself for chaining
    pub fn each_pair<F>(&self, mut visitor: F) -> &Self
    where
        F: FnMut(&Key, &Value),
    {
        for (key, value) in &self.entries {
            visitor(key, value);
        }
        self
    }

    /// Visit each key in order; returns the map itself for chaining
    pub fn each_key<F>(&self, mut visitor: F) -> &Self
    where
        F: FnMut(&Key),
    {
        for key in self.entries.keys() {
            visitor(key);
        }
        self
    }

    /// Visit each value in order; returns the map itself for chaining
    pub fn each_value<F>(&self, mut visitor: F) -> &Self
    where
        F: FnMut(&Value),
    {
        for value in self.entries.values() {
            visitor(value);
        }
        self
    }

    /// Restartable sequence of entries as of this call
    pub fn enum_pairs(&self) -> Enumerator<(Key, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Restartable sequence of keys as of this call
    pub fn enum_keys(&self) -> Enumerator<Key> {
        self.entries.keys().cloned().collect()
    }

    /// Restartable sequence of values as of this call
    pub fn enum_values(&self) -> Enumerator<Value> {
        self.entries.values().cloned().collect()
    }

    /// Borrowing iterator over entries in order
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Get all keys as vector
    pub fn keys(&self) -> Vec<Key> {
        self.entries.keys().cloned().collect()
    }

    /// Get all values as vector
    pub fn values(&self) -> Vec<Value> {
        self.entries.values().cloned().collect()
    }

    /// Check if key is bound (the default resolver does not count)
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Check if any bound value equals `value`
    pub fn contains_value(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.entries.values().any(|v| *v == value)
    }

    /// First key bound to a value equal to `value`
    pub fn key_for(&self, value: impl Into<Value>) -> Option<&Key> {
        let value = value.into();
        self.entries
            .iter()
            .find_map(|(k, v)| (*v == value).then_some(k))
    }

    /// `set` every entry of `other`, in its order
    pub fn merge(&mut self, other: &Map) -> &mut Self {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries; the default resolver is kept
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{} => {}", k.inspect(), v.inspect()))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abc() -> Map {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    #[test]
    fn test_map_new() {
        let map = Map::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(map.default_resolver().is_none());
    }

    #[test]
    fn test_set_returns_previous() {
        let mut map = Map::new();
        assert_eq!(map.set("k", 1), None);
        assert_eq!(map.set("k", 2), Some(Value::from(1)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = abc();
        map.set("a", 10);
        assert_eq!(
            map.keys(),
            vec![Key::from("a"), Key::from("b"), Key::from("c")]
        );
        assert_eq!(map.get("a"), Some(Value::from(10)));
    }

    #[test]
    fn test_delete_closes_gap() {
        let mut map = abc();
        assert_eq!(map.delete("b"), Some(Value::from(2)));
        map.set("b", 20);
        assert_eq!(
            map.keys(),
            vec![Key::from("a"), Key::from("c"), Key::from("b")]
        );
    }

    #[test]
    fn test_delete_absent_ignores_resolver() {
        let mut map = Map::with_default(0);
        assert_eq!(map.delete("missing"), None);
    }

    #[test]
    fn test_get_raw_ignores_resolver() {
        let map = Map::with_default("fallback");
        assert_eq!(map.get("x"), Some(Value::string("fallback")));
        assert_eq!(map.get_raw("x"), None);
        assert!(!map.contains_key("x"));
    }

    #[test]
    fn test_clear_keeps_resolver() {
        let mut map = abc();
        map.set_default(0);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get("a"), Some(Value::from(0)));
    }

    #[test]
    fn test_fetch_with_callback_wins_over_default() {
        let map = abc();
        let result = map
            .fetch_with(
                "z",
                Fallback::default_value("ignored")
                    .and_on_missing(|k| Value::string(format!("cb {}", k))),
            )
            .unwrap();
        assert_eq!(result, Value::string("cb z"));
    }

    #[test]
    fn test_fetch_ignores_default_resolver() {
        let map = Map::with_default(0);
        assert_eq!(
            map.fetch("x"),
            Err(MapError::KeyNotFound {
                key: Key::from("x")
            })
        );
    }

    #[test]
    fn test_key_for_first_match() {
        let map: Map = [("a", 1), ("b", 2), ("c", 2)].into_iter().collect();
        assert_eq!(map.key_for(2), Some(&Key::from("b")));
        assert_eq!(map.key_for(9), None);
    }

    #[test]
    fn test_merge_overwrites_in_place_and_appends() {
        let mut map = abc();
        let other: Map = [("b", 20), ("d", 4)].into_iter().collect();
        map.merge(&other);
        assert_eq!(
            map.values(),
            vec![Value::from(1), Value::from(20), Value::from(3), Value::from(4)]
        );
    }

    #[test]
    fn test_equality_ignores_order_and_resolver() {
        let forward: Map = [("a", 1), ("b", 2)].into_iter().collect();
        let mut backward: Map = [("b", 2), ("a", 1)].into_iter().collect();
        backward.set_default(99);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_display() {
        let mut map = Map::new();
        map.set(Key::symbol("name"), "Charlie");
        map.set(Key::symbol("age"), 35);
        assert_eq!(map.to_string(), "{:name => \"Charlie\", :age => 35}");
    }
}
