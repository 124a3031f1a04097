//! Durable key/value storage for the session record.
//!
//! Values are raw strings so that a backend can hold whatever was written to
//! it, including records that no longer parse. Interpreting them is the
//! session store's job.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Returns true when `key` can name a stored record.
///
/// Keys end up as file names, so they must be non-empty, must not start with
/// `.` and must not contain path separators or `..`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.contains("..")
}

/// Client-local persistent storage surviving process restarts.
pub trait SessionStorage {
    /// Reads the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile storage backed by a map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage keeping one `<key>.json` file per key under a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` as the storage root.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage root.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("user").unwrap(), None);

        storage.set("user", "{}").unwrap();
        assert_eq!(storage.get("user").unwrap().as_deref(), Some("{}"));

        storage.set("user", "[]").unwrap();
        assert_eq!(storage.get("user").unwrap().as_deref(), Some("[]"));

        storage.remove("user").unwrap();
        assert_eq!(storage.get("user").unwrap(), None);
    }

    #[test]
    fn memory_storage_remove_absent_key_succeeds() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove("user").is_ok());
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("state");

        let mut first = FileStorage::new(&root);
        first.set("user", r#"{"id":"1"}"#).unwrap();
        assert!(root.join("user.json").exists());

        let second = FileStorage::new(&root);
        assert_eq!(second.get("user").unwrap().as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[test]
    fn file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("never-created"));
        assert_eq!(storage.get("user").unwrap(), None);
    }

    #[test]
    fn file_storage_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set("user", "x").unwrap();
        storage.remove("user").unwrap();
        storage.remove("user").unwrap();
        assert_eq!(storage.get("user").unwrap(), None);
    }

    #[test]
    fn file_storage_reports_unreadable_entry() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the read fail.
        std::fs::create_dir(dir.path().join("user.json")).unwrap();

        let storage = FileStorage::new(dir.path());
        assert!(matches!(storage.get("user"), Err(StorageError::Io(_))));
    }

    #[test]
    fn key_check() {
        assert!(is_valid_key("user"));
        assert!(is_valid_key("wf-session.v2"));
        for key in ["", "nested/user", "..\\user", "../escaped", "a..b", ".hidden"] {
            assert!(!is_valid_key(key), "{key:?} should be rejected");
        }
    }

    #[test]
    fn file_storage_refuses_keys_outside_its_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("state");
        let mut storage = FileStorage::new(&root);

        let err = storage.set("../escaped", "{}").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(key) if key == "../escaped"));
        assert!(!dir.path().join("escaped.json").exists());

        assert!(matches!(storage.set("nested/user", "{}"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(storage.get("nested/user"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(storage.remove("../escaped"), Err(StorageError::InvalidKey(_))));
    }
}
