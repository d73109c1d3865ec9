//! Stored-media collaborator.
//!
//! The engine consumes photo storage as "store bytes, get a stable
//! reference back; delete by reference". Deletion is idempotent so the reset
//! executor can retry without special-casing already-gone media.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;
use uuid::Uuid;

/// Media store failures. Treated as transient by the reset path.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to store media: {0}")]
    PutFailed(String),

    #[error("Failed to delete '{url}': {message}")]
    DeleteFailed { url: String, message: String },
}

/// External photo storage.
pub trait MediaStore: Send + Sync {
    /// Store bytes, returning a stable reference.
    fn put(&self, bytes: &[u8]) -> Result<String, MediaError>;

    /// Delete by reference. Deleting an unknown reference succeeds.
    fn delete(&self, url: &str) -> Result<(), MediaError>;
}

/// Filesystem-backed store writing uuid-named files under a root directory.
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: PathBuf) -> Result<Self, MediaError> {
        std::fs::create_dir_all(&root)
            .map_err(|e| MediaError::PutFailed(format!("create {}: {e}", root.display())))?;
        Ok(Self { root })
    }
}

impl MediaStore for FsMediaStore {
    fn put(&self, bytes: &[u8]) -> Result<String, MediaError> {
        let name = format!("{}.jpg", Uuid::new_v4());
        let path = self.root.join(&name);
        std::fs::write(&path, bytes)
            .map_err(|e| MediaError::PutFailed(format!("write {}: {e}", path.display())))?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn delete(&self, url: &str) -> Result<(), MediaError> {
        match std::fs::remove_file(url) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::DeleteFailed {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// In-memory store for tests, with optional delete-failure injection.
#[derive(Default)]
pub struct MemoryMediaStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_deletes: AtomicBool,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delete fail, to exercise best-effort cleanup.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().expect("media store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, url: &str) -> bool {
        self.blobs
            .lock()
            .expect("media store lock poisoned")
            .contains_key(url)
    }
}

impl MediaStore for MemoryMediaStore {
    fn put(&self, bytes: &[u8]) -> Result<String, MediaError> {
        let url = format!("mem://{}", Uuid::new_v4());
        self.blobs
            .lock()
            .expect("media store lock poisoned")
            .insert(url.clone(), bytes.to_vec());
        Ok(url)
    }

    fn delete(&self, url: &str) -> Result<(), MediaError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(MediaError::DeleteFailed {
                url: url.to_string(),
                message: "injected failure".to_string(),
            });
        }
        self.blobs
            .lock()
            .expect("media store lock poisoned")
            .remove(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryMediaStore::new();
        let url = store.put(b"bytes").unwrap();
        assert!(store.contains(&url));

        store.delete(&url).unwrap();
        assert!(!store.contains(&url));
        // Idempotent delete.
        store.delete(&url).unwrap();
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryMediaStore::new();
        let url = store.put(b"bytes").unwrap();
        store.fail_deletes(true);
        assert!(store.delete(&url).is_err());
        store.fail_deletes(false);
        assert!(store.delete(&url).is_ok());
    }

    #[test]
    fn test_fs_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().join("media")).unwrap();

        let url = store.put(b"jpeg bytes").unwrap();
        assert_eq!(std::fs::read(&url).unwrap(), b"jpeg bytes");

        store.delete(&url).unwrap();
        assert!(!std::path::Path::new(&url).exists());
        // Deleting a missing file is not an error.
        store.delete(&url).unwrap();
    }
}
