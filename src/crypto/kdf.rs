//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! PBKDF2 is iterated so that every password guess costs an attacker
//! 480 000 HMAC-SHA256 rounds.  The iteration count is fixed: envelopes
//! carry no parameters, so changing it would orphan every stored
//! recording.

use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 480_000;

/// A 32-byte key derived from a password that automatically zeroes
/// its memory when dropped.
///
/// The key only ever lives in memory; it is recomputed from the
/// password and the envelope salt whenever it is needed.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt always produce the same key.  An empty
/// password is accepted like any other string.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    derive_with_iterations(password.as_bytes(), salt, ITERATIONS)
}

fn derive_with_iterations(password: &[u8], salt: &[u8], iterations: u32) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut bytes);
    let key = DerivedKey::new(bytes);
    bytes.zeroize();
    key
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
