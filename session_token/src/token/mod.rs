mod cipher;
mod clock;
mod errors;
mod main;
mod types;

pub use cipher::{AesGcmCipher, TokenCipher};
pub use clock::{Clock, SystemClock};
pub use errors::{CipherError, TokenError};
pub use main::TokenService;
pub use types::{
    IssueOptions, IssuedToken, TokenEnvelope, VerificationResult, VerificationStatus,
    VerifyOptions,
};

#[cfg(test)]
pub(crate) use main::test_utils;
