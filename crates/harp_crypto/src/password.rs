//! Login password hashing — server-side credential verification.
//!
//! Independent of `kdf`: this hash authenticates a login, the KDF derives the
//! envelope key. They share an algorithm family (Argon2id) but never a salt —
//! PHC hashes carry their own per-hash random salt inside the encoded string,
//! so the stored hash can never double as key material.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::CryptoError;

/// Hash a login password into a PHC string for storage.
pub fn hash_password(plaintext: &str) -> Result<String, CryptoError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a login password against a stored PHC string.
///
/// Comparison is constant-time (handled by the `password-hash` verifier).
/// A malformed stored hash verifies false rather than erroring, so the caller
/// can treat every failure identically.
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("pw2", &hash));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_verifies_false() {
        assert!(!verify_password("pw1", "not a phc string"));
        assert!(!verify_password("pw1", ""));
    }
}
