//! Library module — stored recordings and their metadata.
//!
//! This module provides:
//! - Value types returned to callers (`recording`)
//! - The high-level `Library` for uploading, listing, downloading,
//!   decrypting, verifying and deleting recordings (`store`)

pub mod recording;
pub mod store;

// Re-export the most commonly used items.
pub use recording::{DecryptedRecording, LibraryStats, RecordingSummary, UploadReceipt};
pub use store::Library;
