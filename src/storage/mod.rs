//! Persisted key-value storage
//!
//! Progress and player state live in two independent records, each stored
//! as a JSON document under its own key. Every mutation rewrites the whole
//! record. Backends are injected behind [`KeyValueStore`] so a session can
//! run against files on disk or an in-memory map.

mod file_store;
mod memory_store;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Key of the per-character progress record
pub const PROGRESS_KEY: &str = "nihon-progress";

/// Key of the player state record
pub const PLAYER_STATE_KEY: &str = "nihon-player-state";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Backend holding persisted records as structured text
pub trait KeyValueStore: Send + Sync {
    /// Read a record, `None` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a record
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a record; deleting a missing record is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Load a record, falling back to `T::default()` when it is absent or unreadable.
///
/// Corrupt data is logged and otherwise ignored.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    load_or_else(store, key, T::default)
}

/// Like [`load_or_default`] with an explicit fallback constructor.
pub fn load_or_else<T, F>(store: &dyn KeyValueStore, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let content = match store.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return fallback(),
        Err(e) => {
            log::warn!("Failed to read record '{}', using defaults: {}", key, e);
            return fallback();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Record '{}' is corrupt, using defaults: {}", key, e);
            fallback()
        }
    }
}

/// Serialize and overwrite a record
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_load_missing_record_defaults() {
        let store = MemoryStore::new();
        let value: BTreeMap<String, u32> = load_or_default(&store, "missing");
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_corrupt_record_defaults() {
        let store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();

        let value: BTreeMap<String, u32> = load_or_default(&store, "broken");
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut value = BTreeMap::new();
        value.insert("あ".to_string(), 3u32);

        save(&store, "numbers", &value).unwrap();
        let loaded: BTreeMap<String, u32> = load_or_default(&store, "numbers");
        assert_eq!(loaded, value);
    }
}
