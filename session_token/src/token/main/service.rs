use crate::config::{DEFAULT_SECRET_KEY_LENGTH, MIN_SECRET_KEY_LENGTH};
use crate::token::cipher::{AesGcmCipher, TokenCipher};
use crate::token::clock::{Clock, SystemClock};
use crate::token::errors::TokenError;
use crate::utils::{RandomSource, SystemRandomSource, gen_random_alphanumeric};

/// Issues and verifies self-contained encrypted session tokens.
///
/// The service holds no state between calls; its collaborators are the
/// cipher, the randomness source used for key generation, and the clock.
/// `TokenService::new()` uses AES-256-GCM, the OS RNG and the system clock.
#[derive(Debug, Clone, Default)]
pub struct TokenService<C = AesGcmCipher, R = SystemRandomSource, K = SystemClock> {
    pub(super) cipher: C,
    pub(super) rng: R,
    pub(super) clock: K,
}

impl TokenService {
    pub fn new() -> Self {
        Self {
            cipher: AesGcmCipher,
            rng: SystemRandomSource,
            clock: SystemClock,
        }
    }
}

impl<C, R, K> TokenService<C, R, K>
where
    C: TokenCipher,
    R: RandomSource,
    K: Clock,
{
    pub fn with_parts(cipher: C, rng: R, clock: K) -> Self {
        Self { cipher, rng, clock }
    }

    /// Generates a random key of `len` characters from `[0-9a-zA-Z]`.
    ///
    /// A length of 0 is raised to the minimum of 1. Keys are best-effort
    /// unique and meant for per-token use, not as long-lived secrets.
    pub fn generate_secret_key(&self, len: usize) -> Result<String, TokenError> {
        let len = len.max(MIN_SECRET_KEY_LENGTH);
        Ok(gen_random_alphanumeric(&self.rng, len)?)
    }
}

pub(super) fn resolve_key_length(len: Option<usize>) -> usize {
    len.unwrap_or(*DEFAULT_SECRET_KEY_LENGTH)
}
