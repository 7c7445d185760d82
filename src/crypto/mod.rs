//! Cryptographic primitives for ReelVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The `salt || ciphertext` envelope layout (`envelope`)
//! - The fast SHA-256 password pre-check (`verify`)
//! - The protect/unprotect facade used by the library (`protect`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod protect;
pub mod verify;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{protect, unprotect, check_password, ...};
pub use encryption::{decrypt, encrypt};
pub use envelope::{pack, unpack};
pub use kdf::{derive_key, generate_salt, DerivedKey, KEY_LEN, SALT_LEN};
pub use protect::{check_password, make_verification_hash, protect, unprotect, ProtectedBlob};
pub use verify::hash_password;
