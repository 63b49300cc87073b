//! session_token - Stateless encrypted session tokens with refresh windows
//!
//! A token is an AES-256-GCM sealed envelope holding a caller payload, its
//! creation time, and optional access and refresh expiry timestamps. No
//! server-side session store is needed: verification decrypts the token,
//! classifies its expiry state, and when the access window has lapsed inside
//! an open refresh window, mints a replacement token with the same payload.
//!
//! ```no_run
//! use session_token::{IssueOptions, VerificationStatus, VerifyOptions, issue_token, verify_token};
//!
//! let issued = issue_token(
//!     &serde_json::json!({"user_id": "42"}),
//!     IssueOptions::new()
//!         .access_token_expired_in(15 * 60 * 1000)
//!         .refresher_expired_in(7 * 24 * 3600 * 1000),
//! )?;
//!
//! let result = verify_token::<serde_json::Value>(&issued.token, &issued.key, VerifyOptions::new());
//! assert_eq!(result.status, VerificationStatus::Verified);
//! # Ok::<(), session_token::TokenError>(())
//! ```

mod config;
mod token;
mod utils;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use config::{DEFAULT_SECRET_KEY_LENGTH, MIN_SECRET_KEY_LENGTH};
pub use token::{
    AesGcmCipher, CipherError, Clock, IssueOptions, IssuedToken, SystemClock, TokenCipher,
    TokenEnvelope, TokenError, TokenService, VerificationResult, VerificationStatus,
    VerifyOptions,
};
pub use utils::{ALPHANUMERIC, RandomSource, SystemRandomSource, UtilError};

/// Issue a token using the default [`TokenService`]
pub fn issue_token<P>(payload: &P, options: IssueOptions) -> Result<IssuedToken, TokenError>
where
    P: Serialize + ?Sized,
{
    TokenService::new().issue_token(payload, options)
}

/// Verify a token using the default [`TokenService`]
pub fn verify_token<P>(
    token: &str,
    secret_key: &str,
    options: VerifyOptions,
) -> VerificationResult<P>
where
    P: DeserializeOwned,
{
    TokenService::new().verify_token(token, secret_key, options)
}

/// Generate a random `[0-9a-zA-Z]` key using the default [`TokenService`]
pub fn generate_secret_key(len: usize) -> Result<String, TokenError> {
    TokenService::new().generate_secret_key(len)
}
