use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;
use thiserror::Error;

/// Characters a generated secret key is drawn from: `[0-9a-zA-Z]`.
pub const ALPHANUMERIC: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

// 248 = 4 * 62; bytes at or above it would bias the low indices.
const REJECTION_THRESHOLD: u8 = 248;

/// Source of random bytes used for secret key generation.
///
/// The default [`SystemRandomSource`] reads from the operating system. Tests
/// substitute a deterministic sequence.
pub trait RandomSource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), UtilError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandomSource;

impl RandomSource for SystemRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), UtilError> {
        let rng = ring::rand::SystemRandom::new();
        rng.fill(dest)
            .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))
    }
}

pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| UtilError::Format("Failed to decode base64url".to_string()))?;
    Ok(decoded)
}

pub(crate) fn base64url_encode(input: Vec<u8>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Generates `len` characters drawn uniformly, with replacement, from [`ALPHANUMERIC`].
pub(crate) fn gen_random_alphanumeric<R: RandomSource + ?Sized>(
    rng: &R,
    len: usize,
) -> Result<String, UtilError> {
    let mut out = String::with_capacity(len);
    let mut buf = vec![0u8; len.saturating_mul(2).max(8)];

    while out.len() < len {
        rng.fill(&mut buf)?;
        for byte in buf.iter().copied().filter(|b| *b < REJECTION_THRESHOLD) {
            out.push(ALPHANUMERIC[(byte % 62) as usize] as char);
            if out.len() == len {
                break;
            }
        }
    }

    Ok(out)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid format: {0}")]
    Format(String),
}
