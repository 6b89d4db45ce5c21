//! Persistent key-value storage.
//!
//! Values are JSON text stored under string keys, the same contract a
//! browser's local storage offers. [`FileStorage`] keeps every key in one
//! JSON object file inside the data directory; [`MemoryStorage`] keeps them
//! in memory.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::io::lock::{LockError, StorageLock};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};

/// Name of the storage file inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("storage rejected write to '{0}'")]
    Rejected(String),
}

/// Key-value store that survives restarts.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Record something that went wrong (or was deleted) without failing
    /// the caller. Storage without a log drops the entry.
    fn log_recovery(&self, _entry: RecoveryEntry) {}
}

// ---------------------------------------------------------------------------
// File-backed storage
// ---------------------------------------------------------------------------

/// All keys in `<data_dir>/storage.json`, as a JSON object of strings.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
    /// Set once a corrupt storage file has been reported
    reported_corrupt: Cell<bool>,
}

impl FileStorage {
    /// Open storage in `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir).map_err(|e| StorageError::Write {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        Ok(FileStorage {
            data_dir: data_dir.to_path_buf(),
            reported_corrupt: Cell::new(false),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    /// Current contents. A missing file is empty; so is a corrupt one,
    /// whose text is copied to the recovery log the first time it is seen.
    fn read_entries(&self) -> Result<IndexMap<String, String>, StorageError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(e) => return Err(StorageError::Read { path, source: e }),
        };
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        match serde_json::from_str::<IndexMap<String, String>>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                if !self.reported_corrupt.replace(true) {
                    self.log_recovery(RecoveryEntry::now(
                        RecoveryCategory::Parser,
                        "storage file unreadable, starting empty",
                        vec![
                            ("File".to_string(), path.display().to_string()),
                            ("Error".to_string(), e.to_string()),
                        ],
                        content,
                    ));
                }
                Ok(IndexMap::new())
            }
        }
    }

    /// Apply `change` to the stored map and write it back, under the lock.
    fn update<F>(&mut self, key: &str, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut IndexMap<String, String>),
    {
        let _lock = StorageLock::acquire_default(&self.data_dir)?;
        let mut entries = self.read_entries()?;
        change(&mut entries);

        let path = self.path();
        let content = serde_json::to_string_pretty(&entries).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            source: e,
        })?;
        if let Err(e) = recovery::atomic_write(&path, content.as_bytes()) {
            self.log_recovery(RecoveryEntry::now(
                RecoveryCategory::Write,
                format!("{} write failed", key),
                vec![
                    ("Key".to_string(), key.to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                entries.get(key).cloned().unwrap_or_default(),
            ));
            return Err(StorageError::Write { path, source: e });
        }
        self.reported_corrupt.set(false);
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(key, |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.update(key, |entries| {
            entries.shift_remove(key);
        })
    }

    fn log_recovery(&self, entry: RecoveryEntry) {
        recovery::log_recovery(&self.data_dir, entry);
    }
}

// ---------------------------------------------------------------------------
// In-memory storage
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    entries: IndexMap<String, String>,
    reject_writes: bool,
    writes: usize,
    recovery: Vec<RecoveryEntry>,
}

/// Storage held in memory. Clones share the same map, so a store and the
/// code inspecting it can each hold a handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every later `set`/`remove` fail
    pub fn reject_writes(&self, reject: bool) {
        self.state.borrow_mut().reject_writes = reject;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.borrow().entries.get(key).cloned()
    }

    pub fn recovery_entries(&self) -> Vec<RecoveryEntry> {
        self.state.borrow().recovery.clone()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.reject_writes {
            return Err(StorageError::Rejected(key.to_string()));
        }
        state.entries.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.reject_writes {
            return Err(StorageError::Rejected(key.to_string()));
        }
        state.entries.shift_remove(key);
        state.writes += 1;
        Ok(())
    }

    fn log_recovery(&self, entry: RecoveryEntry) {
        self.state.borrow_mut().recovery.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::recovery::read_recovery_entries;
    use tempfile::TempDir;

    #[test]
    fn missing_file_has_no_keys() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(storage.get("todos").unwrap(), None);
    }

    #[test]
    fn open_creates_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        let storage = FileStorage::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(storage.data_dir(), dir.as_path());
    }

    #[test]
    fn set_get_round_trip_across_instances() {
        let tmp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        storage.set("todos", "[]").unwrap();
        storage.set("darkMode", "true").unwrap();

        let reopened = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(reopened.get("todos").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("darkMode").unwrap().as_deref(), Some("true"));
        assert!(!tmp.path().join(".lock").exists());
    }

    #[test]
    fn keys_keep_insertion_order_on_disk() {
        let tmp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        storage.set("todos", "[]").unwrap();
        storage.set("darkMode", "false").unwrap();
        storage.set("isArabic", "false").unwrap();
        storage.set("todos", "[1]").unwrap();

        let content = fs::read_to_string(storage.path()).unwrap();
        let todos = content.find("\"todos\"").unwrap();
        let dark = content.find("\"darkMode\"").unwrap();
        let arabic = content.find("\"isArabic\"").unwrap();
        assert!(todos < dark && dark < arabic);
        assert_eq!(storage.get("todos").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let tmp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        storage.set("todos", "[]").unwrap();
        storage.set("darkMode", "true").unwrap();
        storage.remove("darkMode").unwrap();
        assert_eq!(storage.get("darkMode").unwrap(), None);
        assert_eq!(storage.get("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_file_reads_empty_and_is_logged_once() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        fs::write(storage.path(), "not json {{{").unwrap();

        assert_eq!(storage.get("todos").unwrap(), None);
        assert_eq!(storage.get("darkMode").unwrap(), None);

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Parser);
        assert_eq!(entries[0].body, "not json {{{");
    }

    #[test]
    fn write_over_corrupt_file_starts_fresh() {
        let tmp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(tmp.path()).unwrap();
        fs::write(storage.path(), "[1, 2").unwrap();
        storage.set("todos", "[]").unwrap();
        assert_eq!(storage.get("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_storage_shares_state_between_clones() {
        let storage = MemoryStorage::new().with_entry("darkMode", "true");
        let mut handle = storage.clone();
        handle.set("todos", "[]").unwrap();
        assert_eq!(storage.raw("todos").as_deref(), Some("[]"));
        assert_eq!(storage.get("darkMode").unwrap().as_deref(), Some("true"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn memory_storage_can_reject_writes() {
        let mut storage = MemoryStorage::new();
        storage.reject_writes(true);
        assert!(matches!(
            storage.set("todos", "[]"),
            Err(StorageError::Rejected(_))
        ));
        assert_eq!(storage.raw("todos"), None);
        assert_eq!(storage.write_count(), 0);
    }
}
