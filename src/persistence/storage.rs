use super::files::{atomic_write, read_file};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read or write the backing storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage, the shape of browser local storage
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// All keys kept in a single JSON object file
///
/// Every `set` rewrites the whole file atomically. A file that is missing
/// or not a JSON object reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_map(&self) -> Result<Map<String, Value>, StorageError> {
        let content = read_file(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;

        let map = match content.as_deref().map(serde_json::from_str::<Value>) {
            Some(Ok(Value::Object(map))) => map,
            Some(_) => {
                log::warn!("Ignoring unreadable storage file {}", self.path.display());
                Map::new()
            }
            None => Map::new(),
        };
        Ok(map)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load_map()?;
        Ok(map.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));

        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        atomic_write(&self.path, &json).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory storage
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("storage.json"));

        assert_eq!(storage.get("tasks").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_and_get() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        let mut storage = FileStorage::new(&path);

        storage.set("tasks", "[]").unwrap();
        storage.set("nextTaskId", "3").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("nextTaskId").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_file_storage_corrupt_file_reads_as_empty() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.get("tasks").unwrap(), None);

        // Writing replaces the corrupt content
        storage.set("tasks", "[]").unwrap();
        assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_non_string_value_is_returned_as_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, r#"{"nextTaskId": 7}"#).unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("nextTaskId").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_file_storage_write_error_names_path() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing-dir").join("storage.json");
        let mut storage = FileStorage::new(&path);

        let err = storage.set("tasks", "[]").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(err.to_string().contains("storage.json"));
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("tasks").unwrap(), None);

        storage.set("tasks", "[]").unwrap();
        assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[]"));
    }
}
