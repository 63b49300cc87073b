use thiserror::Error;

use crate::utils::UtilError;

/// Failures raised by a [`TokenCipher`](super::TokenCipher).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The secret key cannot be used (e.g. it is empty)
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The ciphertext is not in the expected wire format
    #[error("Malformed ciphertext: {0}")]
    Malformed(String),

    /// Authentication failed: wrong key or tampered ciphertext
    #[error("Decryption failed: {0}")]
    Decrypt(String),

    /// The underlying primitive failed (e.g. no randomness available)
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Errors from issuing or decoding a token.
///
/// [`TokenService::verify_token`](super::TokenService::verify_token) collapses
/// all of these into a single `NotVerified` result; the distinct variants are
/// kept for logging and for callers of
/// [`TokenService::decode_token`](super::TokenService::decode_token).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// Decrypted plaintext is not a valid envelope
    #[error("Envelope parse error: {0}")]
    EnvelopeParse(String),

    /// An expiry duration does not fit in the timestamp range
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
