//! Blob storage for recording bytes.
//!
//! The library only talks to the `BlobStore` trait, so where bytes live
//! (a local directory, memory, a remote object store) never touches the
//! crypto code.  Blobs are opaque: protected recordings are stored as
//! envelopes, unprotected ones as the raw upload.

pub mod fs;
pub mod memory;

use crate::errors::Result;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

/// A flat namespace of named, immutable blobs.
pub trait BlobStore: Send + Sync {
    /// Store `data` under `name`, replacing any previous blob.
    fn put(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Fetch the blob stored under `name`.
    ///
    /// Fails with `BlobNotFound` if there is none.
    fn get(&self, name: &str) -> Result<Vec<u8>>;

    /// Remove the blob stored under `name`.
    ///
    /// Returns `false` if nothing was stored under that name.
    fn delete(&self, name: &str) -> Result<bool>;

    /// Returns `true` if a blob is stored under `name`.
    fn exists(&self, name: &str) -> Result<bool>;
}
