//! Named JSON blobs in a string key/value store.
//!
//! The browser build backs this with `window.localStorage`; native code and
//! tests use [`MemoryStore`]. The backend holds the canonical copy of every
//! value: callers keep in-memory caches that are filled on first read and
//! written through on every change.

mod memory;

pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Every key owned by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Schemas,
    LastParsedData,
    PreviewData,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::Schemas,
        StorageKey::LastParsedData,
        StorageKey::PreviewData,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Schemas => "document-parser-schemas",
            StorageKey::LastParsedData => "document-parser-last-data",
            StorageKey::PreviewData => "document-parser-preview-data",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// A write made by another browsing context sharing the same storage.
///
/// `new_value` is `None` when the key was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    pub new_value: Option<String>,
}

impl StorageChange {
    pub fn is_for(&self, key: StorageKey) -> bool {
        self.key == key.as_str()
    }
}

/// Minimal string store, shaped after the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON (de)serialization on top of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the value under `key` with the JSON text of `value`.
    pub fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.store.set_item(key.as_str(), &text)?;
        log::debug!("stored {} bytes under {}", text.len(), key.as_str());
        Ok(())
    }

    /// Reads the value under `key`, or `default` if it is absent or unreadable.
    ///
    /// Corrupt content and backend failures are logged, never returned.
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        self.try_load(key).unwrap_or(default)
    }

    /// Like [`load`](Self::load) but distinguishes "nothing usable" as `None`.
    pub fn try_load<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let text = match self.store.get_item(key.as_str()) {
            Ok(text) => text?,
            Err(err) => {
                log::warn!("could not read {}: {err}", key.as_str());
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("ignoring corrupt value under {}: {err}", key.as_str());
                None
            }
        }
    }

    pub fn clear(&self, key: StorageKey) -> Result<(), StorageError> {
        self.store.remove_item(key.as_str())
    }

    /// Removes every key in [`StorageKey::ALL`] and nothing else.
    pub fn clear_all(&self) -> Result<(), StorageError> {
        for key in StorageKey::ALL {
            self.clear(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn persistence() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new())
    }

    #[test]
    fn save_then_load_returns_an_equal_value() {
        let persistence = persistence();
        let value = json!({"nested": {"list": [1, "two", null, true]}, "n": 1.5});

        persistence.save(StorageKey::PreviewData, &value).unwrap();

        let loaded: Value = persistence.load(StorageKey::PreviewData, Value::Null);
        assert_eq!(loaded, value);
    }

    #[test]
    fn save_replaces_the_previous_value() {
        let persistence = persistence();
        persistence.save(StorageKey::Schemas, &json!([1, 2, 3])).unwrap();
        persistence.save(StorageKey::Schemas, &json!([4])).unwrap();

        let loaded: Vec<u32> = persistence.load(StorageKey::Schemas, Vec::new());
        assert_eq!(loaded, [4]);
    }

    #[test]
    fn corrupt_value_loads_as_default() {
        let persistence = persistence();
        persistence
            .store()
            .set_item(StorageKey::Schemas.as_str(), "{not json")
            .unwrap();

        let loaded: Vec<String> = persistence.load(StorageKey::Schemas, vec!["fallback".into()]);
        assert_eq!(loaded, ["fallback"]);
    }

    #[test]
    fn wrongly_shaped_value_loads_as_default() {
        let persistence = persistence();
        persistence.save(StorageKey::Schemas, &json!({"a": 1})).unwrap();

        let loaded: Vec<String> = persistence.load(StorageKey::Schemas, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn absent_key_loads_as_default() {
        let loaded: Option<Value> = persistence().load(StorageKey::LastParsedData, None);
        assert!(loaded.is_none());
    }

    #[test]
    fn clear_all_leaves_foreign_keys_alone() {
        let persistence = persistence();
        for key in StorageKey::ALL {
            persistence.save(key, &json!(1)).unwrap();
        }
        persistence.store().set_item("theme", "dark").unwrap();

        persistence.clear_all().unwrap();

        for key in StorageKey::ALL {
            assert_eq!(persistence.store().get_item(key.as_str()).unwrap(), None);
        }
        assert_eq!(
            persistence.store().get_item("theme").unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn clear_removes_a_single_key() {
        let persistence = persistence();
        persistence.save(StorageKey::Schemas, &json!([])).unwrap();
        persistence.save(StorageKey::PreviewData, &json!({})).unwrap();

        persistence.clear(StorageKey::PreviewData).unwrap();

        assert!(persistence.try_load::<Value>(StorageKey::PreviewData).is_none());
        assert!(persistence.try_load::<Value>(StorageKey::Schemas).is_some());
    }

    #[test]
    fn key_names_round_trip() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(StorageKey::from_name("theme"), None);
    }
}
