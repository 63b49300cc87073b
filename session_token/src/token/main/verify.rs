use serde::de::DeserializeOwned;

use super::service::{TokenService, resolve_key_length};
use crate::token::cipher::TokenCipher;
use crate::token::clock::Clock;
use crate::token::errors::TokenError;
use crate::token::types::{
    IssueOptions, TokenEnvelope, TokenState, VerificationResult, VerificationStatus, VerifyOptions,
};
use crate::utils::RandomSource;

/// Classifies an envelope against `now`. A timestamp equal to `now` has not
/// yet expired.
pub(super) fn classify(envelope: &TokenEnvelope, now: i64) -> TokenState {
    let access_expired = envelope.access_expired_at.is_some_and(|at| at < now);

    match envelope.refresher_expired_at {
        Some(refresher_at) if refresher_at < now && access_expired => {
            TokenState::AccessAndRefresherExpired
        }
        Some(refresher_at) if refresher_at >= now && access_expired => TokenState::Refreshable,
        Some(_) => TokenState::Valid,
        None if access_expired => TokenState::AccessExpired,
        None => TokenState::Valid,
    }
}

/// Logs why a token was not verified and returns the level used. Cipher
/// failures (wrong key, tampering) are warnings; the rest are debug noise.
pub(super) fn log_verification_failure(e: &TokenError) -> tracing::Level {
    match e {
        TokenError::Cipher(_) => {
            tracing::warn!("Token not verified: {}", e);
            tracing::Level::WARN
        }
        _ => {
            tracing::debug!("Token not verified: {}", e);
            tracing::Level::DEBUG
        }
    }
}

impl<C, R, K> TokenService<C, R, K>
where
    C: TokenCipher,
    R: RandomSource,
    K: Clock,
{
    /// Decrypts `token` with `secret_key` and parses the envelope.
    ///
    /// Unlike [`verify_token`](Self::verify_token) this reports why decoding
    /// failed and performs no expiry checks.
    pub fn decode_token(
        &self,
        token: &str,
        secret_key: &str,
    ) -> Result<TokenEnvelope, TokenError> {
        let plaintext = self.cipher.decrypt(token, secret_key)?;
        serde_json::from_str(&plaintext).map_err(|e| TokenError::EnvelopeParse(e.to_string()))
    }

    /// Verifies `token` and classifies its expiry state.
    ///
    /// When the access window has lapsed but the refresh window is still open,
    /// a replacement token carrying the same payload is issued with both
    /// windows re-based on the current time, and returned in `new_token`
    /// together with the key that seals it. Otherwise `new_token` and `key`
    /// echo the inputs.
    ///
    /// Never fails: a wrong key, a corrupt token, a payload that does not fit
    /// `P`, or a failed re-issue all yield [`VerificationStatus::NotVerified`]
    /// with every other field empty.
    pub fn verify_token<P>(
        &self,
        token: &str,
        secret_key: &str,
        options: VerifyOptions,
    ) -> VerificationResult<P>
    where
        P: DeserializeOwned,
    {
        match self.try_verify_token(token, secret_key, options) {
            Ok(result) => result,
            Err(e) => {
                log_verification_failure(&e);
                VerificationResult::not_verified()
            }
        }
    }

    fn try_verify_token<P>(
        &self,
        token: &str,
        secret_key: &str,
        options: VerifyOptions,
    ) -> Result<VerificationResult<P>, TokenError>
    where
        P: DeserializeOwned,
    {
        let envelope = self.decode_token(token, secret_key)?;
        let payload: P = serde_json::from_value(envelope.payload.clone())
            .map_err(|e| TokenError::EnvelopeParse(format!("Unexpected payload: {e}")))?;

        let now = self.clock.now_millis();
        let state = classify(&envelope, now);
        tracing::debug!(
            ?state,
            now,
            created_at = envelope.created_at,
            "Token classified"
        );

        let created_at = envelope.created_at;
        let (status, new_token, key) = match state {
            TokenState::Valid => (
                VerificationStatus::Verified,
                token.to_string(),
                secret_key.to_string(),
            ),
            TokenState::AccessExpired => (
                VerificationStatus::VerifiedAccessExpired,
                token.to_string(),
                secret_key.to_string(),
            ),
            TokenState::AccessAndRefresherExpired => (
                VerificationStatus::VerifiedAccessAndRefresherExpired,
                token.to_string(),
                secret_key.to_string(),
            ),
            TokenState::Refreshable => {
                let (new_token, key) = self.refresh(envelope, secret_key, options)?;
                (VerificationStatus::VerifiedAccessExpired, new_token, key)
            }
        };

        Ok(VerificationResult {
            status,
            payload: Some(payload),
            new_token: Some(new_token),
            key: Some(key),
            created_at: Some(created_at),
        })
    }

    /// Re-issues the envelope's payload with the original window lengths
    /// starting from now. Returns the new token and its key.
    fn refresh(
        &self,
        envelope: TokenEnvelope,
        secret_key: &str,
        options: VerifyOptions,
    ) -> Result<(String, String), TokenError> {
        let (Some(access_range), Some(refresher_range)) =
            (envelope.access_range(), envelope.refresher_range())
        else {
            return Err(TokenError::EnvelopeParse(
                "Refresh requires both expiry windows".to_string(),
            ));
        };

        let key = if options.is_key_random {
            self.generate_secret_key(resolve_key_length(options.random_key_length))?
        } else {
            secret_key.to_string()
        };

        tracing::debug!(
            access_range,
            refresher_range,
            is_key_random = options.is_key_random,
            "Refreshing token"
        );

        let issued = self.issue_value(
            envelope.payload,
            IssueOptions::new()
                .secret_key(key)
                .access_token_expired_in(access_range)
                .refresher_expired_in(refresher_range)
                .with_refresher(true),
        )?;

        Ok((issued.token, issued.key))
    }
}
