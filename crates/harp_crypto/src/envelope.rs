//! Secret envelope — what one encrypted secret value looks like on the wire.
//!
//! Wire shape (hex-encoded for storage and transport):
//!   [ nonce (16 bytes) | ciphertext + tag ]
//!
//! The cipher is AES-256-GCM instantiated with a 16-byte nonce so the shape
//! stays `nonce || ciphertext`. GCM authenticates: opening with the wrong key
//! or a tampered envelope fails loudly instead of yielding garbage bytes.
//! The server stores and forwards envelopes without ever opening them.

use aes_gcm::{
    aead::{consts::U16, Aead, KeyInit},
    aes::Aes256,
    AesGcm, Nonce,
};
use zeroize::Zeroizing;

use crate::error::{CryptoError, DecryptError};
use crate::kdf::EnvelopeKey;

/// Nonce prefix length in bytes.
pub const NONCE_LEN: usize = 16;

type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Encrypt `plaintext` under `key`, prepending a fresh random 16-byte nonce,
/// and hex-encode the result.
pub fn seal(key: &EnvelopeKey, plaintext: &[u8]) -> Result<String, CryptoError> {
    let cipher = EnvelopeCipher::new_from_slice(&key.0).map_err(|_| CryptoError::Encrypt)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    {
        use rand::RngCore;
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::Encrypt)?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(hex::encode(out))
}

/// Decode and decrypt a hex envelope produced by [`seal`].
pub fn open(key: &EnvelopeKey, envelope_hex: &str) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
    let data = hex::decode(envelope_hex)?;
    if data.len() < NONCE_LEN {
        return Err(DecryptError::Truncated(NONCE_LEN));
    }
    let (nonce_bytes, ct) = data.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        EnvelopeCipher::new_from_slice(&key.0).map_err(|_| DecryptError::Authentication)?;

    let plaintext = cipher
        .decrypt(nonce, ct)
        .map_err(|_| DecryptError::Authentication)?;

    Ok(Zeroizing::new(plaintext))
}
