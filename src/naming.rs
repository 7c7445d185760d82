//! Recording filenames: generation, sanitization and extension checks.

use chrono::NaiveDateTime;

use crate::errors::{ReelVaultError, Result};

/// Extension used for password-protected recordings.
pub const PROTECTED_EXT: &str = "enc";

/// Extension used for plain recordings.
pub const PLAIN_EXT: &str = "webm";

/// Longest filename we accept.
const MAX_NAME_LEN: usize = 255;

/// Build a fresh `recording_YYYYMMDD_HHMMSS.<ext>` name.
///
/// `taken` reports whether a candidate is already in use; on collision a
/// numeric suffix is appended (`recording_..._2.webm`, `_3`, ...).
pub fn generate_filename<F>(now: NaiveDateTime, encrypted: bool, mut taken: F) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    let stamp = now.format("%Y%m%d_%H%M%S");
    let ext = if encrypted { PROTECTED_EXT } else { PLAIN_EXT };

    let base = format!("recording_{stamp}.{ext}");
    if !taken(&base)? {
        return Ok(base);
    }

    let mut n: u32 = 2;
    loop {
        let candidate = format!("recording_{stamp}_{n}.{ext}");
        if !taken(&candidate)? {
            return Ok(candidate);
        }
        n = n.checked_add(1).ok_or_else(|| {
            ReelVaultError::InvalidFilename("exhausted filename suffixes".into())
        })?;
    }
}

/// Validate that a stored recording name is safe to use as a path.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty, must not start with a period, must not contain
/// `..`, and must be at most 255 characters.
pub fn sanitize_filename(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(ReelVaultError::InvalidFilename(
            "filename cannot be empty".into(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ReelVaultError::InvalidFilename(format!(
            "filename cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    if name.starts_with('.') || name.contains("..") {
        return Err(ReelVaultError::InvalidFilename(format!(
            "'{name}' must not start with '.' or contain '..'"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(ReelVaultError::InvalidFilename(format!(
            "'{name}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(name)
}

/// Returns `true` if `name` ends in one of `allowed` (case-insensitive).
pub fn is_allowed_extension(name: &str, allowed: &[String]) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext))
        }
        None => false,
    }
}

/// Returns `true` for names that can belong to a stored recording, i.e.
/// end in `.enc` or `.webm`.  Keeps `metadata.db` and `audit.db` out of reach.
pub fn is_stored_recording_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && (ext == PROTECTED_EXT || ext == PLAIN_EXT),
        None => false,
    }
}

/// Name offered for a decrypted download: `.enc` becomes `.webm`.
pub fn decrypted_download_name(name: &str) -> String {
    match name.strip_suffix(&format!(".{PROTECTED_EXT}")) {
        Some(stem) => format!("{stem}.{PLAIN_EXT}"),
        None => name.to_string(),
    }
}
