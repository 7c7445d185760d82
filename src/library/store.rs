//! High-level recording operations used by CLI commands.
//!
//! `Library` wraps the catalog, a blob store and the crypto layer so the
//! rest of the application can work with simple calls like
//! `library.upload("screen.webm", &bytes, Some(password))`.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;

use crate::catalog::{Catalog, NewRecording, RecordingRecord};
use crate::config::Settings;
use crate::crypto::{check_password, protect, unprotect};
use crate::errors::{ReelVaultError, Result};
use crate::naming::{
    decrypted_download_name, generate_filename, is_allowed_extension, is_stored_recording_name,
    sanitize_filename,
};
use crate::storage::{BlobStore, FsBlobStore};

use super::recording::{DecryptedRecording, LibraryStats, RecordingSummary, UploadReceipt};

/// The main library handle.  Open one with `Library::open` (filesystem
/// storage) or `Library::with_parts` (any `BlobStore`).
pub struct Library<S: BlobStore> {
    catalog: Catalog,
    blobs: S,
    max_upload_bytes: Option<u64>,
    allowed_extensions: Vec<String>,
}

impl Library<FsBlobStore> {
    /// Open the library under `project_dir` using `settings`.
    ///
    /// Creates the recordings directory and the catalog on first use.
    pub fn open(project_dir: &Path, settings: &Settings) -> Result<Self> {
        let blobs = FsBlobStore::open(&settings.recordings_path(project_dir))?;
        let catalog = Catalog::open(&settings.database_path(project_dir))?;
        Ok(Self::with_parts(catalog, blobs, settings))
    }
}

impl<S: BlobStore> Library<S> {
    /// Build a library from an already-open catalog and blob store.
    pub fn with_parts(catalog: Catalog, blobs: S, settings: &Settings) -> Self {
        Self {
            catalog,
            blobs,
            max_upload_bytes: settings.max_upload_bytes,
            allowed_extensions: settings.allowed_extensions.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------

    /// Store a new recording.
    ///
    /// With a non-empty password the bytes are sealed into an envelope and
    /// the verification hash plus base64 salt are recorded; an empty or
    /// absent password stores the bytes as-is.  The blob is written before
    /// the catalog row, and removed again if the row cannot be inserted.
    pub fn upload(
        &mut self,
        original_name: &str,
        data: &[u8],
        password: Option<&str>,
    ) -> Result<UploadReceipt> {
        if original_name.is_empty() {
            return Err(ReelVaultError::EmptyUpload);
        }
        if !is_allowed_extension(original_name, &self.allowed_extensions) {
            return Err(ReelVaultError::UnsupportedFileType(
                original_name.to_string(),
                self.allowed_extensions.join(", "),
            ));
        }

        let size = data.len() as u64;
        if let Some(limit) = self.max_upload_bytes {
            if size > limit {
                return Err(ReelVaultError::UploadTooLarge { size, limit });
            }
        }

        let password = password.filter(|p| !p.is_empty());
        let encrypted = password.is_some();

        let filename = generate_filename(Local::now().naive_local(), encrypted, |candidate| {
            Ok(self.catalog.contains(candidate)? || self.blobs.exists(candidate)?)
        })?;

        let (stored, password_hash, salt) = match password {
            Some(pw) => {
                let sealed = protect(data, pw)?;
                let salt_b64 = BASE64.encode(sealed.salt);
                (sealed.envelope, Some(sealed.verification_hash), Some(salt_b64))
            }
            None => (data.to_vec(), None, None),
        };
        let stored_bytes = stored.len() as u64;

        self.blobs.put(&filename, &stored)?;

        let new = NewRecording {
            filename: filename.clone(),
            original_name: original_name.to_string(),
            file_size: stored_bytes,
            password_hash,
            salt,
        };
        if let Err(e) = self.catalog.insert(&new) {
            let _ = self.blobs.delete(&filename);
            return Err(e);
        }

        Ok(UploadReceipt {
            filename,
            encrypted,
            stored_bytes,
        })
    }

    // ------------------------------------------------------------------
    // Read operations
    // ------------------------------------------------------------------

    /// All recordings, newest first.
    pub fn list(&self) -> Result<Vec<RecordingSummary>> {
        Ok(self
            .catalog
            .list()?
            .into_iter()
            .map(RecordingSummary::from)
            .collect())
    }

    /// Return the bytes of an unprotected recording.
    ///
    /// Protected recordings are refused; use `decrypt` instead.
    pub fn download(&self, filename: &str) -> Result<Vec<u8>> {
        let record = self.record(filename)?;
        if record.encrypted {
            return Err(ReelVaultError::RecordingProtected(record.filename));
        }
        self.blobs.get(&record.filename)
    }

    /// Decrypt a protected recording.
    ///
    /// The cheap hash comparison runs first so an obviously wrong password
    /// never pays for PBKDF2.  Passing it only earns an attempt: the
    /// authenticated decryption decides.
    pub fn decrypt(&self, filename: &str, password: &str) -> Result<DecryptedRecording> {
        if password.is_empty() {
            return Err(ReelVaultError::PasswordRequired);
        }

        let record = self.protected_record(filename)?;
        if !passes_precheck(&record, password) {
            return Err(ReelVaultError::WrongPassword);
        }

        let envelope = self.blobs.get(&record.filename)?;
        let data = unprotect(&envelope, password)?;

        Ok(DecryptedRecording {
            download_name: decrypted_download_name(&record.filename),
            data,
        })
    }

    /// Fast password check against the stored verification hash only.
    ///
    /// A protected row with no stored hash never matches here; only
    /// `decrypt` and `verify_deep` fall through to decryption in that case.
    pub fn verify_password(&self, filename: &str, password: &str) -> Result<bool> {
        let record = self.protected_record(filename)?;
        Ok(record
            .password_hash
            .as_deref()
            .is_some_and(|hash| check_password(password, hash)))
    }

    /// Full check: the fast hash comparison followed by a real decryption.
    ///
    /// Returns `Ok(false)` for a wrong password or a tampered envelope;
    /// a blob too short to be an envelope is still an error.
    pub fn verify_deep(&self, filename: &str, password: &str) -> Result<bool> {
        let record = self.protected_record(filename)?;
        if !passes_precheck(&record, password) {
            return Ok(false);
        }

        let envelope = self.blobs.get(&record.filename)?;
        match unprotect(&envelope, password) {
            Ok(_) => Ok(true),
            Err(ReelVaultError::WrongPassword) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Count and total stored size.
    pub fn stats(&self) -> Result<LibraryStats> {
        let s = self.catalog.stats()?;
        Ok(LibraryStats {
            total_recordings: s.count,
            total_bytes: s.total_bytes,
        })
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Remove a recording's catalog row and blob.
    ///
    /// Either half may be missing (a blob left behind by a failed upload,
    /// a row whose file was removed by hand); whatever exists is removed.
    /// Only names shaped like stored recordings are accepted, so the
    /// catalog and audit databases are never touched.  For a protected
    /// recording this destroys the salt along with the ciphertext.
    pub fn delete(&mut self, filename: &str) -> Result<()> {
        let name = sanitize_filename(filename)?;
        if !is_stored_recording_name(name) {
            return Err(ReelVaultError::RecordingNotFound(name.to_string()));
        }

        let had_row = self.catalog.delete(name)?;
        let had_blob = self.blobs.delete(name)?;
        if !had_row && !had_blob {
            return Err(ReelVaultError::RecordingNotFound(name.to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn record(&self, filename: &str) -> Result<RecordingRecord> {
        let name = sanitize_filename(filename)?;
        self.catalog
            .get(name)?
            .ok_or_else(|| ReelVaultError::RecordingNotFound(name.to_string()))
    }

    fn protected_record(&self, filename: &str) -> Result<RecordingRecord> {
        let record = self.record(filename)?;
        if !record.encrypted {
            return Err(ReelVaultError::RecordingNotProtected(record.filename));
        }
        Ok(record)
    }
}

/// Pre-check ahead of decryption.  A protected row without a stored hash
/// skips straight to decryption, which stays the final word.
fn passes_precheck(record: &RecordingRecord, password: &str) -> bool {
    match record.password_hash.as_deref() {
        Some(hash) => check_password(password, hash),
        None => true,
    }
}
