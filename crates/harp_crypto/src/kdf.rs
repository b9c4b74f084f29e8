//! Key derivation — Argon2id, password → 32-byte envelope key.
//!
//! The envelope key never leaves the client; the server only ever sees
//! ciphertext. The salt is NOT a secret but it is portability-critical: the
//! same (password, salt) pair must be available on every machine that needs
//! to decrypt, so the salt is generated once at account setup and carried
//! alongside the user's credentials.

use argon2::{Argon2, Params, Version};
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// 32-byte symmetric key for sealing/opening secret envelopes.
/// Zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct EnvelopeKey(pub [u8; 32]);

/// Argon2id parameters — tuned for interactive use.
fn argon2_params() -> Params {
    Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 iterations
        1,         // p_cost: 1 thread
        Some(32),  // output len
    )
    .expect("Static Argon2 params are always valid")
}

/// Derive an envelope key from a password + 16-byte salt.
///
/// A fixed application-wide salt would let one precomputation attack every
/// account, so each account gets its own random salt (see [`generate_salt`]).
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<EnvelopeKey, CryptoError> {
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon2_params());
    let mut output = [0u8; 32];
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(EnvelopeKey(output))
}

/// Generate a fresh random salt (call once at account setup; keep with the
/// account credentials).
pub fn generate_salt() -> [u8; SALT_LEN] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
