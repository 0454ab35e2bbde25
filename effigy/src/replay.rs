//! Persistence of failing inputs across runs: a small key/value `Store`
//! abstraction, plus (behind the `replay` feature) JSON encoding of decision
//! tries so a failure found today can be replayed verbatim tomorrow.
//!
//! Four keys are conventionally used by the built-in strategies: `"INPUT"`
//! (the serialized decision trie), `"SEED"`, `"SIZE"` and `"MAX_SUCCESS"`
//! (the PRNG state a `random` strategy was run with). None of this module
//! cares what backs the store — a file, a database row, an in-memory map
//! for tests.
use std::{collections::HashMap, fs, io, path::PathBuf, sync::Mutex};

/// A place to persist and recall small string values, keyed by name.
pub trait Store {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
}

/// An in-memory store, useful for tests and for sharing replay state within
/// a single process run.
#[derive(Default)]
pub struct MemoryStore(Mutex<HashMap<String, String>>);

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        if value.is_empty() {
            self.0.lock().unwrap().remove(key);
        } else {
            self.0.lock().unwrap().insert(key.to_string(), value);
        }
    }
}

/// A directory-backed store: each key is a file under `root`, one write per
/// key. Missing files read as absent; writing an empty value deletes the
/// file rather than leaving an empty one behind.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn write_to(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, value)
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn write(&self, key: &str, value: String) {
        if value.is_empty() {
            let _ = fs::remove_file(self.path(key));
        } else {
            let _ = self.write_to(key, &value);
        }
    }
}

#[cfg(feature = "replay")]
mod json {
    //! A trie's children can't be encoded as a JSON object keyed by atom: a
    //! symbol and a number atom can stringify to the same text (the symbol
    //! `"7"` and the number `7`), and object keys are always JSON strings,
    //! so any string-based encoding of the key risks conflating the two.
    //! Instead each child is an array entry pairing its atom (encoded as the
    //! JSON type that matches its kind: a string for a symbol, a number for
    //! a number) with its subtrie; decoding dispatches on that JSON type
    //! rather than inspecting the string's contents.
    use crate::{atom::Atom, trie::Trie};
    use serde_json::{Map, Value};

    pub fn trie_to_value(trie: &Trie) -> Value {
        let mut object = Map::new();
        object.insert(
            "value".to_string(),
            match trie.value() {
                Some(decision) => Value::from(decision),
                None => Value::Null,
            },
        );
        let children: Vec<Value> = trie
            .entries()
            .map(|(atom, child)| {
                let mut entry = Map::new();
                entry.insert("atom".to_string(), atom_to_value(&atom));
                entry.insert("child".to_string(), trie_to_value(&child));
                Value::Object(entry)
            })
            .collect();
        object.insert("children".to_string(), Value::Array(children));
        Value::Object(object)
    }

    pub fn value_to_trie(value: &Value) -> Trie {
        build(value)
    }

    fn build(value: &Value) -> Trie {
        let Some(object) = value.as_object() else {
            return Trie::new();
        };
        let decision = object.get("value").and_then(Value::as_u64);
        let mut trie = Trie::new().set(&[], decision);
        if let Some(children) = object.get("children").and_then(Value::as_array) {
            for entry in children {
                let Some(entry) = entry.as_object() else {
                    continue;
                };
                let Some(atom_value) = entry.get("atom") else {
                    continue;
                };
                let Some(atom) = value_to_atom(atom_value) else {
                    continue;
                };
                let child = entry.get("child").map(build).unwrap_or_default();
                trie = trie.with_child(&atom, child);
            }
        }
        trie
    }

    fn atom_to_value(atom: &Atom) -> Value {
        match atom {
            Atom::Symbol(value) => Value::String(value.to_string()),
            Atom::Number(value) => Value::from(*value),
        }
    }

    fn value_to_atom(value: &Value) -> Option<Atom> {
        match value {
            Value::String(text) => Some(Atom::symbol(text)),
            Value::Number(number) => number.as_i64().map(Atom::number),
            _ => None,
        }
    }
}

#[cfg(feature = "replay")]
pub use json::{trie_to_value, value_to_trie};

#[cfg(feature = "replay")]
pub fn load_trie(store: &dyn Store, key: &str) -> Option<crate::trie::Trie> {
    let text = store.read(key)?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    Some(value_to_trie(&value))
}

#[cfg(feature = "replay")]
pub fn save_trie(store: &dyn Store, key: &str, trie: &crate::trie::Trie) {
    let value = trie_to_value(trie);
    if let Ok(text) = serde_json::to_string(&value) {
        store.write(key, text);
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_deletes() {
        let root = std::env::temp_dir().join(format!("effigy-replay-{}", fastrand::u64(..)));
        let store = FileStore::new(&root);
        assert_eq!(store.read("INPUT"), None);
        store.write("INPUT", "abc".to_string());
        assert_eq!(store.read("INPUT"), Some("abc".to_string()));
        store.write("INPUT", String::new());
        assert_eq!(store.read("INPUT"), None);
        let _ = fs::remove_dir_all(&root);
    }
}
