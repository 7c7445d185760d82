use thiserror::Error;

/// All errors that can occur in ReelVault.
#[derive(Debug, Error)]
pub enum ReelVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Raised by the cipher when the authentication tag does not verify.
    #[error("Authentication failed — ciphertext rejected")]
    AuthenticationFailed,

    #[error("Wrong password or corrupted data")]
    WrongPassword,

    #[error("Corrupted data — stored blob is too short to hold a salt")]
    MalformedEnvelope,

    // --- Library errors ---
    #[error("Recording '{0}' not found")]
    RecordingNotFound(String),

    #[error("Recording '{0}' is password protected — use `reelvault decrypt`")]
    RecordingProtected(String),

    #[error("Recording '{0}' is not password protected")]
    RecordingNotProtected(String),

    #[error("Password required")]
    PasswordRequired,

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Unsupported file type '{0}' (allowed: {1})")]
    UnsupportedFileType(String, String),

    #[error("Upload of {size} bytes exceeds the limit of {limit} bytes")]
    UploadTooLarge { size: u64, limit: u64 },

    #[error("No file selected")]
    EmptyUpload,

    // --- Storage errors ---
    #[error("Blob '{0}' not found in storage")]
    BlobNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

impl From<rusqlite::Error> for ReelVaultError {
    fn from(e: rusqlite::Error) -> Self {
        ReelVaultError::CatalogError(e.to_string())
    }
}

/// Convenience type alias for ReelVault results.
pub type Result<T> = std::result::Result<T, ReelVaultError>;
