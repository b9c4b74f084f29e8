use thiserror::Error;

/// Failure of a crypto primitive itself (KDF, cipher, RNG). Fatal for the
/// operation in progress; never partially applied.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Envelope encryption failed")]
    Encrypt,
}

/// A received envelope that cannot be opened. Distinct from [`CryptoError`]:
/// the primitive is fine, the input is not.
#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("Envelope is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Envelope shorter than the {0}-byte nonce prefix")]
    Truncated(usize),

    #[error("Envelope authentication failed (wrong key or tampering)")]
    Authentication,
}
