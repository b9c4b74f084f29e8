use reqwest::StatusCode;
use thiserror::Error;

use harp_crypto::{CryptoError, DecryptError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server rejected the request: {0}")]
    Api(StatusCode),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Could not open envelope: {0}")]
    Decrypt(#[from] DecryptError),

    #[error("Decrypted secret is not valid UTF-8")]
    NotUtf8,
}
