//! Storage backends
//!
//! String-keyed storage for the persisted election blobs. The store talks to
//! a [`StorageBackend`] trait object so it can run against the filesystem in
//! production and an in-memory map in tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::store::error::{StoreError, StoreResult};

/// String-keyed blob storage.
///
/// Read failures are treated as "key absent" (logged by the implementation);
/// write and remove failures surface as errors for the caller to log.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the value stored under `key`. Removing an absent key is not an
    /// error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Filesystem-backed storage: one `<key>.json` file per key under a data
/// directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The data directory this backend writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read storage file; treating key as absent");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and demos.
///
/// Cloning shares the underlying map, so a clone can stand in for "the same
/// storage after a restart". Writes can be made to fail to exercise the
/// quota-exceeded error path.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `put` calls fail, simulating storage that is full or
    /// disabled.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated write failure".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_backend_put_get_remove() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.get("missing"), None);

        backend.put("vote_app_data", "{\"a\":1}").unwrap();
        assert_eq!(backend.get("vote_app_data").unwrap(), "{\"a\":1}");

        backend.remove("vote_app_data").unwrap();
        assert_eq!(backend.get("vote_app_data"), None);

        // Removing an absent key is fine
        backend.remove("vote_app_data").unwrap();
    }

    #[test]
    fn test_file_backend_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = FileBackend::open(&nested).unwrap();
        backend.put("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_memory_backend_shared_between_clones() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();

        backend.put("k", "v").unwrap();
        assert_eq!(clone.get("k").unwrap(), "v");

        clone.remove("k").unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_memory_backend_simulated_write_failure() {
        let backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        assert!(backend.put("k", "v").is_err());

        backend.set_fail_writes(false);
        assert!(backend.put("k", "v").is_ok());
    }
}
