use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plaintext structure sealed inside every token.
///
/// All timestamps are milliseconds since the Unix epoch. Absent expiries are
/// omitted from the serialized form rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEnvelope {
    pub payload: Value,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_expired_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresher_expired_at: Option<i64>,
}

impl TokenEnvelope {
    /// Original access window length, if the token has one.
    pub fn access_range(&self) -> Option<i64> {
        self.access_expired_at
            .and_then(|at| at.checked_sub(self.created_at))
    }

    /// Original refresh window length, if the token has one.
    pub fn refresher_range(&self) -> Option<i64> {
        self.refresher_expired_at
            .and_then(|at| at.checked_sub(self.created_at))
    }
}

/// Temporal state of a decoded envelope at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenState {
    Valid,
    /// Access window lapsed and there is no refresh window to re-issue from
    AccessExpired,
    /// Access window lapsed while the refresh window is still open
    Refreshable,
    AccessAndRefresherExpired,
}

/// Result of a successful issuance. The key is always returned so a generated
/// one can be persisted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    VerifiedAccessAndRefresherExpired,
    VerifiedAccessExpired,
    NotVerified,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Verified => "Verified",
            Self::VerifiedAccessAndRefresherExpired => "VerifiedAccessAndRefresherExpired",
            Self::VerifiedAccessExpired => "VerifiedAccessExpired",
            Self::NotVerified => "NotVerified",
        };
        f.write_str(s)
    }
}

/// Outcome of [`TokenService::verify_token`](super::TokenService::verify_token).
///
/// On `NotVerified` every field other than `status` is `None`. Otherwise all
/// fields are populated; `new_token` equals the verified token unless a
/// refresh took place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult<P> {
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl<P> VerificationResult<P> {
    pub fn not_verified() -> Self {
        Self {
            status: VerificationStatus::NotVerified,
            payload: None,
            new_token: None,
            key: None,
            created_at: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status != VerificationStatus::NotVerified
    }
}

/// Options for [`TokenService::issue_token`](super::TokenService::issue_token).
///
/// Durations are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOptions {
    pub secret_key: Option<String>,
    pub secret_key_length: Option<usize>,
    pub access_token_expired_in: Option<i64>,
    pub refresher_expired_in: Option<i64>,
    /// Accepted for compatibility; only `refresher_expired_in` controls
    /// whether a token can be refreshed.
    pub with_refresher: bool,
}

impl IssueOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    pub fn secret_key_length(mut self, len: usize) -> Self {
        self.secret_key_length = Some(len);
        self
    }

    /// Access window length. `created_at + millis` must fit in an `i64`,
    /// otherwise issuing fails with `TokenError::InvalidDuration`.
    pub fn access_token_expired_in(mut self, millis: i64) -> Self {
        self.access_token_expired_in = Some(millis);
        self
    }

    /// Refresh window length, with the same range limit as
    /// [`access_token_expired_in`](Self::access_token_expired_in).
    pub fn refresher_expired_in(mut self, millis: i64) -> Self {
        self.refresher_expired_in = Some(millis);
        self
    }

    pub fn with_refresher(mut self, with_refresher: bool) -> Self {
        self.with_refresher = with_refresher;
        self
    }
}

/// Options for [`TokenService::verify_token`](super::TokenService::verify_token).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Generate a fresh key for a refreshed token instead of reusing the
    /// verification key
    pub is_key_random: bool,
    pub random_key_length: Option<usize>,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_key_random(mut self, is_key_random: bool) -> Self {
        self.is_key_random = is_key_random;
        self
    }

    pub fn random_key_length(mut self, len: usize) -> Self {
        self.random_key_length = Some(len);
        self
    }
}
