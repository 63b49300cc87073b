//! Central configuration for the session_token crate

use std::sync::LazyLock;

/// Smallest secret key length the generator will produce.
pub const MIN_SECRET_KEY_LENGTH: usize = 1;

const FALLBACK_SECRET_KEY_LENGTH: usize = 6;

/// Length of generated secret keys when the caller does not give one.
///
/// Read from `SESSION_TOKEN_KEY_LENGTH`. Default: 6
pub static DEFAULT_SECRET_KEY_LENGTH: LazyLock<usize> = LazyLock::new(key_length_from_env);

fn key_length_from_env() -> usize {
    parse_key_length(std::env::var("SESSION_TOKEN_KEY_LENGTH").ok())
}

fn parse_key_length(value: Option<String>) -> usize {
    value
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|len| *len >= MIN_SECRET_KEY_LENGTH)
        .unwrap_or(FALLBACK_SECRET_KEY_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper function to set an environment variable for the duration of the test
    /// and restore the original value afterward.
    fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();

        match value {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        let result = test();

        match original {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        result
    }

    #[test]
    fn test_parse_key_length() {
        assert_eq!(parse_key_length(None), 6);
        assert_eq!(parse_key_length(Some("16".to_string())), 16);
        assert_eq!(parse_key_length(Some(" 8 ".to_string())), 8);
        assert_eq!(parse_key_length(Some("1".to_string())), 1);
    }

    #[test]
    fn test_parse_key_length_invalid() {
        // Non-numeric and below-minimum values fall back to the default
        for value in ["invalid", "0", "-3", ""] {
            assert_eq!(
                parse_key_length(Some(value.to_string())),
                6,
                "value {value:?} should fall back to 6"
            );
        }
    }

    #[test]
    #[serial]
    fn test_key_length_from_env_default() {
        let len = with_env_var("SESSION_TOKEN_KEY_LENGTH", None, key_length_from_env);
        assert_eq!(len, 6);
    }

    #[test]
    #[serial]
    fn test_key_length_from_env_custom() {
        let len = with_env_var("SESSION_TOKEN_KEY_LENGTH", Some("24"), key_length_from_env);
        assert_eq!(len, 24);
    }

    #[test]
    #[serial]
    fn test_key_length_from_env_invalid() {
        let len = with_env_var("SESSION_TOKEN_KEY_LENGTH", Some("0"), key_length_from_env);
        assert_eq!(len, 6);
    }

    #[test]
    fn test_default_secret_key_length_at_least_minimum() {
        assert!(*DEFAULT_SECRET_KEY_LENGTH >= MIN_SECRET_KEY_LENGTH);
    }
}
