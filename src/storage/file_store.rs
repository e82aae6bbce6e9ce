//! File-backed record storage
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! ├── nihon-progress.json
//! └── nihon-player-state.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, Result, StorageError};

pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_path`, creating the directory if needed
    pub fn new(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("nihon"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.record_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_get_missing_record() {
        let (store, _temp) = create_test_store();
        assert!(store.get("nihon-progress").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let (store, _temp) = create_test_store();
        store.set("nihon-progress", "{\"あ\":1}").unwrap();

        assert_eq!(
            store.get("nihon-progress").unwrap().as_deref(),
            Some("{\"あ\":1}")
        );
        assert!(store.base_path().join("nihon-progress.json").exists());
    }

    #[test]
    fn test_remove() {
        let (store, _temp) = create_test_store();
        store.set("nihon-player-state", "{}").unwrap();
        store.remove("nihon-player-state").unwrap();
        assert!(store.get("nihon-player-state").unwrap().is_none());

        // Removing twice is fine
        store.remove("nihon-player-state").unwrap();
    }
}
