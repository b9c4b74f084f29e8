//! harp_crypto — Harp secret store cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize derived key material on drop.
//! - Two independent password-derived artifacts that must never be confused:
//!   the envelope key (decrypts secrets, derived client-side) and the login
//!   hash (authenticates requests, stored server-side).
//!
//! # Module layout
//! - `kdf`      — Argon2id password → 32-byte envelope key
//! - `envelope` — AES-256-GCM seal/open with the hex `nonce || ciphertext` wire shape
//! - `password` — PHC-string login hashing and constant-time verification
//! - `error`    — `CryptoError` / `DecryptError`

pub mod envelope;
pub mod error;
pub mod kdf;
pub mod password;

pub use envelope::{open, seal};
pub use error::{CryptoError, DecryptError};
pub use kdf::EnvelopeKey;
