//! Envelope byte layout for recordings protected at rest.
//!
//! ```text
//! [salt: 16 bytes][ciphertext: remainder]
//! ```
//!
//! The envelope has no magic or version field.  Everything after the
//! salt is handed to the cipher untouched, so an envelope holding an
//! empty recording is still longer than 16 bytes (nonce + tag).  A
//! future format change must introduce an explicit version tag.

use super::kdf::SALT_LEN;
use crate::errors::{ReelVaultError, Result};

/// Concatenate the salt and ciphertext into one storable blob.
pub fn pack(salt: &[u8; SALT_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(SALT_LEN + ciphertext.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(ciphertext);
    out
}

/// Split a stored blob back into its salt and ciphertext.
///
/// Fails with `MalformedEnvelope` if the blob cannot hold a full salt.
pub fn unpack(envelope: &[u8]) -> Result<([u8; SALT_LEN], &[u8])> {
    if envelope.len() < SALT_LEN {
        return Err(ReelVaultError::MalformedEnvelope);
    }

    let (salt_bytes, ciphertext) = envelope.split_at(SALT_LEN);
    let salt: [u8; SALT_LEN] = salt_bytes
        .try_into()
        .map_err(|_| ReelVaultError::MalformedEnvelope)?;

    Ok((salt, ciphertext))
}
