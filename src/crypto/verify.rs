//! Fast password pre-check.
//!
//! The verification hash is a plain, unsalted SHA-256 of the password,
//! stored next to the recording so an obviously wrong password can be
//! rejected without paying for PBKDF2.  It is advisory: a match only
//! means decryption is worth attempting.  The authenticated cipher has
//! the final word.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of the hex-encoded hash (SHA-256 = 32 bytes = 64 hex chars).
pub const HASH_HEX_LEN: usize = 64;

/// Hash a password into lowercase hex.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut out = String::with_capacity(HASH_HEX_LEN);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Compare `password` against a stored hash in constant time.
///
/// Uppercase hex in the stored value is tolerated.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let actual = hash_password(password);
    let expected = stored_hash.to_ascii_lowercase();
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_known_sha256() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_of_empty_password() {
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_is_fixed_length_hex() {
        let h = hash_password("a much longer password with spaces");
        assert_eq!(h.len(), HASH_HEX_LEN);
        assert!(h.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[test]
    fn verify_accepts_correct_and_rejects_wrong() {
        let stored = hash_password("secret123");
        assert!(verify("secret123", &stored));
        assert!(!verify("wrong", &stored));
        assert!(!verify("secret123", ""));
    }

    #[test]
    fn verify_tolerates_uppercase_stored_hash() {
        let stored = hash_password("secret123").to_uppercase();
        assert!(verify("secret123", &stored));
    }
}
