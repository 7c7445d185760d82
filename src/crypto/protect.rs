//! Password protection for recordings: the four calls the library uses.
//!
//! Two independent values come out of a password:
//! - the **verification hash** (fast SHA-256, stored in the catalog), and
//! - the **encryption key** (PBKDF2 over a fresh salt, never stored).
//!
//! `unprotect` always runs the authenticated decryption, even when the
//! caller already compared hashes.

use super::encryption::{decrypt, encrypt};
use super::envelope::{pack, unpack};
use super::kdf::{derive_key, generate_salt, SALT_LEN};
use super::verify::{hash_password, verify};
use crate::errors::{ReelVaultError, Result};

/// Output of `protect`: everything the caller needs to persist.
#[derive(Debug, Clone)]
pub struct ProtectedBlob {
    /// `salt || nonce || ciphertext || tag`, ready to write to storage.
    pub envelope: Vec<u8>,
    /// Hex SHA-256 of the password for the fast pre-check.
    pub verification_hash: String,
    /// Copy of the envelope salt, for display/inspection only.
    pub salt: [u8; SALT_LEN],
}

/// Encrypt `plaintext` under `password` with a freshly generated salt.
pub fn protect(plaintext: &[u8], password: &str) -> Result<ProtectedBlob> {
    let salt = generate_salt();
    let key = derive_key(password, &salt);
    let ciphertext = encrypt(&key, plaintext)?;

    Ok(ProtectedBlob {
        envelope: pack(&salt, &ciphertext),
        verification_hash: make_verification_hash(password),
        salt,
    })
}

/// Recover the plaintext from an envelope.
///
/// Fails with `MalformedEnvelope` when the blob is too short to hold a
/// salt, and with `WrongPassword` for any authentication failure, so a
/// caller cannot tell a wrong password from a tampered blob.
pub fn unprotect(envelope: &[u8], password: &str) -> Result<Vec<u8>> {
    let (salt, ciphertext) = unpack(envelope)?;
    let key = derive_key(password, &salt);

    decrypt(&key, ciphertext).map_err(|e| match e {
        ReelVaultError::AuthenticationFailed => ReelVaultError::WrongPassword,
        other => other,
    })
}

/// Cheap pre-flight check of `password` against a stored hash.
pub fn check_password(password: &str, stored_hash: &str) -> bool {
    verify(password, stored_hash)
}

/// Compute the verification hash stored alongside an envelope.
pub fn make_verification_hash(password: &str) -> String {
    hash_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encryption::{NONCE_LEN, TAG_LEN};

    #[test]
    fn envelope_length_is_salt_plus_ciphertext() {
        let blob = protect(b"hello world", "secret123").unwrap();
        assert_eq!(blob.envelope.len(), SALT_LEN + NONCE_LEN + 11 + TAG_LEN);
        assert_eq!(&blob.envelope[..SALT_LEN], &blob.salt);
    }

    #[test]
    fn truncated_ciphertext_reports_wrong_password() {
        // Long enough for a salt, too short for nonce + tag.
        let envelope = vec![0u8; SALT_LEN + 4];
        assert!(matches!(
            unprotect(&envelope, "anything"),
            Err(ReelVaultError::WrongPassword)
        ));
    }
}
