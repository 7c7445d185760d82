//! Value types returned by `Library` operations.
//!
//! These carry no secrets: verification hashes and salts stay inside the
//! catalog, and decrypted bytes only appear in `DecryptedRecording`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::RecordingRecord;

/// Lightweight listing entry for one recording.
#[derive(Debug, Clone, Serialize)]
pub struct RecordingSummary {
    pub filename: String,
    pub original_name: Option<String>,
    /// Stored size in bytes.
    pub size_bytes: u64,
    /// `true` when the recording is password protected.
    pub encrypted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RecordingRecord> for RecordingSummary {
    fn from(r: RecordingRecord) -> Self {
        Self {
            filename: r.filename,
            original_name: r.original_name,
            size_bytes: r.file_size,
            encrypted: r.encrypted,
            created_at: r.created_at,
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    pub filename: String,
    pub encrypted: bool,
    /// Bytes written to storage (envelope size when protected).
    pub stored_bytes: u64,
}

/// Plaintext of a protected recording, with the name to save it under.
pub struct DecryptedRecording {
    pub download_name: String,
    pub data: Vec<u8>,
}

/// Count and total stored size over the whole library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_recordings: u64,
    pub total_bytes: u64,
}
