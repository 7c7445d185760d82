//! In-memory blob store, for tests and embedding.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::BlobStore;
use crate::errors::{ReelVaultError, Result};

/// Keeps every blob in a `HashMap` behind a mutex.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| ReelVaultError::StorageError("blob map lock poisoned".into()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, name: &str, data: &[u8]) -> Result<()> {
        self.lock()?.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Vec<u8>> {
        self.lock()?
            .get(name)
            .cloned()
            .ok_or_else(|| ReelVaultError::BlobNotFound(name.to_string()))
    }

    fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.lock()?.remove(name).is_some())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_existing_blob() {
        let store = MemoryBlobStore::new();
        store.put("a.webm", b"one").unwrap();
        store.put("a.webm", b"two").unwrap();
        assert_eq!(store.get("a.webm").unwrap(), b"two");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_reports_presence() {
        let store = MemoryBlobStore::new();
        store.put("a.webm", b"one").unwrap();
        assert!(store.delete("a.webm").unwrap());
        assert!(!store.delete("a.webm").unwrap());
        assert!(store.is_empty());
    }
}
