//! Satchel core: an insertion-ordered associative container for dynamic values.
//!
//! - [`Map`]: unique keys, insertion-ordered iteration, optional default resolver
//! - [`Value`]: null, bool, number, string, symbol, array, nested map
//! - [`Key`]: the hashable subset of [`Value`]
//! - `dig`: nested lookup across maps and arrays
//!
//! # Example
//!
//! ```
//! use satchel_core::{Key, Map, Value};
//!
//! let mut profile = Map::new();
//! profile.set(Key::symbol("name"), "Charlie");
//! profile.set(Key::symbol("age"), 35);
//!
//! assert_eq!(profile.get(Key::symbol("name")), Some(Value::string("Charlie")));
//! assert_eq!(profile.get(Key::symbol("phone")), None);
//! ```

pub mod convert;
pub mod dig;
pub mod enumerator;
pub mod error;
pub mod key;
pub mod map;
pub mod value;

pub use dig::DigPolicy;
pub use enumerator::Enumerator;
pub use error::{MapError, MapResult};
pub use key::Key;
pub use map::{DefaultFn, DefaultResolver, Fallback, Map};
pub use value::{Value, ValueArray, ValueMap};
