//! Deterministic collaborators for token tests

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use super::TokenService;
use crate::token::cipher::AesGcmCipher;
use crate::token::clock::Clock;
use crate::utils::{RandomSource, UtilError};

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub(crate) fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    pub(crate) fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Random source that cycles through a fixed byte sequence.
#[derive(Debug)]
pub(crate) struct SequenceRandom {
    bytes: Vec<u8>,
    position: Mutex<usize>,
}

impl SequenceRandom {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            position: Mutex::new(0),
        }
    }

    /// Every byte value below the rejection threshold, so keys cover the alphabet.
    pub(crate) fn counting() -> Self {
        Self::new((0u8..248).collect())
    }
}

impl RandomSource for SequenceRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), UtilError> {
        if self.bytes.is_empty() {
            return Err(UtilError::Crypto("Empty random sequence".to_string()));
        }
        let mut position = self
            .position
            .lock()
            .map_err(|_| UtilError::Crypto("Random sequence poisoned".to_string()))?;
        for byte in dest.iter_mut() {
            *byte = self.bytes[*position % self.bytes.len()];
            *position += 1;
        }
        Ok(())
    }
}

pub(crate) type TestService = TokenService<AesGcmCipher, SequenceRandom, ManualClock>;

/// Service with a manual clock starting at `start`; the returned clock handle
/// advances the service's clock.
pub(crate) fn test_service(start: i64) -> (TestService, ManualClock) {
    let clock = ManualClock::new(start);
    let service =
        TokenService::with_parts(AesGcmCipher, SequenceRandom::counting(), clock.clone());
    (service, clock)
}
