use serde::Serialize;
use serde_json::Value;

use super::service::{TokenService, resolve_key_length};
use crate::token::cipher::TokenCipher;
use crate::token::clock::Clock;
use crate::token::errors::TokenError;
use crate::token::types::{IssueOptions, IssuedToken, TokenEnvelope};
use crate::utils::RandomSource;

impl<C, R, K> TokenService<C, R, K>
where
    C: TokenCipher,
    R: RandomSource,
    K: Clock,
{
    /// Seals `payload` into a new token.
    ///
    /// If `options.secret_key` is absent a key of `options.secret_key_length`
    /// characters is generated; the key used is always returned alongside the
    /// token. Expiry timestamps are `now + duration` for each duration given.
    ///
    /// Fails when the payload cannot be serialized, when a duration pushes an
    /// expiry past the `i64` millisecond range, or when the cipher rejects the
    /// key (e.g. an explicit empty key).
    pub fn issue_token<P>(
        &self,
        payload: &P,
        options: IssueOptions,
    ) -> Result<IssuedToken, TokenError>
    where
        P: Serialize + ?Sized,
    {
        let payload =
            serde_json::to_value(payload).map_err(|e| TokenError::Serde(e.to_string()))?;
        self.issue_value(payload, options)
    }

    pub(super) fn issue_value(
        &self,
        payload: Value,
        options: IssueOptions,
    ) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now_millis();

        let key = match options.secret_key {
            Some(key) => key,
            None => self.generate_secret_key(resolve_key_length(options.secret_key_length))?,
        };

        let envelope = TokenEnvelope {
            payload,
            created_at: now,
            access_expired_at: expiry_at(now, options.access_token_expired_in)?,
            refresher_expired_at: expiry_at(now, options.refresher_expired_in)?,
        };

        tracing::debug!(
            created_at = envelope.created_at,
            access_expired_at = ?envelope.access_expired_at,
            refresher_expired_at = ?envelope.refresher_expired_at,
            with_refresher = options.with_refresher,
            "Issuing token"
        );

        let plaintext =
            serde_json::to_string(&envelope).map_err(|e| TokenError::Serde(e.to_string()))?;
        let token = self.cipher.encrypt(&plaintext, &key)?;

        Ok(IssuedToken { token, key })
    }
}

fn expiry_at(now: i64, duration: Option<i64>) -> Result<Option<i64>, TokenError> {
    duration
        .map(|ms| {
            now.checked_add(ms).ok_or_else(|| {
                TokenError::InvalidDuration(format!("{ms}ms from {now} overflows a timestamp"))
            })
        })
        .transpose()
}
