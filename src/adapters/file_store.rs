//! File-backed local durable store.
//!
//! Persists preferences as a JSON map under `~/.tandem/preferences.json`.
//! Writes are flushed and synced before `set_local` returns, so a value
//! the store acknowledged survives an immediate process restart.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SyncError;
use crate::traits::LocalStore;

/// The preferences directory name.
const STORE_DIR: &str = ".tandem";

/// The preferences file name.
const STORE_FILE: &str = "preferences.json";

/// File-backed [`LocalStore`] over a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(STORE_DIR).join(STORE_FILE),
        })
    }

    /// Create a store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full map, treating a missing or unreadable file as empty.
    fn read_map(&self) -> HashMap<String, Value> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return HashMap::new(),
        };
        serde_json::from_reader(BufReader::new(file)).unwrap_or_default()
    }

    /// Write the full map, creating the parent directory if needed, and
    /// sync it to stable storage before returning.
    fn write_map(&self, map: &HashMap<String, Value>) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::LocalWriteFailed {
                message: format!("failed to create {}: {}", parent.display(), e),
            })?;
        }

        let file = File::create(&self.path).map_err(|e| SyncError::LocalWriteFailed {
            message: format!("failed to create {}: {}", self.path.display(), e),
        })?;

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, map).map_err(|e| {
            SyncError::LocalWriteFailed {
                message: format!("failed to serialize preferences: {}", e),
            }
        })?;
        writer.flush().map_err(|e| SyncError::LocalWriteFailed {
            message: format!("failed to flush {}: {}", self.path.display(), e),
        })?;
        file.sync_all().map_err(|e| SyncError::LocalWriteFailed {
            message: format!("failed to sync {}: {}", self.path.display(), e),
        })
    }
}

impl LocalStore for FileStore {
    fn set_local(&self, key: &str, value: &Value) -> Result<(), SyncError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.clone());
        self.write_map(&map)
    }

    fn get_local(&self, key: &str) -> Option<Value> {
        self.read_map().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> FileStore {
        FileStore::with_path(temp_dir.path().join(STORE_DIR).join(STORE_FILE))
    }

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert_eq!(store.get_local("locale"), None);
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.set_local("locale", &json!("es")).unwrap();
        store.set_local("dark_mode", &json!(true)).unwrap();

        assert_eq!(store.get_local("locale"), Some(json!("es")));
        assert_eq!(store.get_local("dark_mode"), Some(json!(true)));
    }

    #[test]
    fn test_overwrite_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.set_local("locale", &json!("es")).unwrap();
        store.set_local("locale", &json!("fr")).unwrap();
        store.set_local("dark_mode", &json!(false)).unwrap();

        assert_eq!(store.get_local("locale"), Some(json!("fr")));
        assert_eq!(store.get_local("dark_mode"), Some(json!(false)));
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = create_test_store(&temp_dir);
            store.set_local("locale", &json!("fr")).unwrap();
        }
        let reopened = create_test_store(&temp_dir);
        assert_eq!(reopened.get_local("locale"), Some(json!("fr")));
    }

    #[test]
    fn test_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(!store.path().parent().unwrap().exists());

        store.set_local("locale", &json!("es")).unwrap();
        assert!(store.path().parent().unwrap().exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not valid json").unwrap();

        assert_eq!(store.get_local("locale"), None);
    }

    #[test]
    fn test_unwritable_path_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        // Occupy the parent path with a file so the directory cannot be created.
        let blocker = temp_dir.path().join("blocked");
        fs::write(&blocker, "file").unwrap();
        let store = FileStore::with_path(blocker.join(STORE_FILE));

        let err = store.set_local("locale", &json!("es")).unwrap_err();
        assert!(err.is_local());
    }
}
