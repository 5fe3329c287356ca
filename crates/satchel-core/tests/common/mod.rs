//! Shared fixtures for satchel-core integration tests

#![allow(dead_code)]

use satchel_core::{Key, Map, Value};
use std::io;
use std::sync::{Arc, Mutex};

pub fn sym(name: &str) -> Key {
    Key::symbol(name)
}

/// `{name: "Charlie", age: 35, email: "charlie@example.com", phone: "123-456-7890"}`
pub fn user_profile() -> Map {
    let mut map = Map::new();
    map.set(sym("name"), "Charlie");
    map.set(sym("age"), 35);
    map.set(sym("email"), "charlie@example.com");
    map.set(sym("phone"), "123-456-7890");
    map
}

/// `{foo: 0, bar: 1, baz: 2}`
pub fn foo_bar_baz() -> Map {
    [(sym("foo"), 0), (sym("bar"), 1), (sym("baz"), 2)]
        .into_iter()
        .collect()
}

/// `{user: {profile: {name: "Alice"}, roles: [{name: "admin"}, {name: "ops"}]}}`
pub fn nested_record() -> Map {
    let mut profile = Map::new();
    profile.set(sym("name"), "Alice");

    let roles: Vec<Value> = ["admin", "ops"]
        .iter()
        .map(|role| {
            let mut m = Map::new();
            m.set(sym("name"), *role);
            Value::map(m)
        })
        .collect();

    let mut user = Map::new();
    user.set(sym("profile"), profile);
    user.set(sym("roles"), roles);

    let mut root = Map::new();
    root.set(sym("user"), user);
    root
}

/// Log sink shared between a test and its subscriber
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with every tracing event captured as plain text
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
