//! Access token storage using the system keyring

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use keyring::Entry;

use super::error::ApiError;

/// Service name for keyring storage
const SERVICE_NAME: &str = "coursetrack";
/// Entry name for the access token
const ACCESS_TOKEN_ENTRY: &str = "access-token";
/// Entry name for the refresh token
const REFRESH_TOKEN_ENTRY: &str = "refresh-token";

/// Source of the bearer token sent with API requests
pub trait TokenProvider: Send + Sync {
    /// Current access token, if any
    fn access_token(&self) -> Option<String>;
}

/// Manages LMS tokens in the system keyring
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenStore;

impl TokenStore {
    fn entry(name: &str) -> Result<Entry, ApiError> {
        Entry::new(SERVICE_NAME, name).map_err(|e| ApiError::Keyring(e.to_string()))
    }

    fn read(name: &str) -> Result<String, ApiError> {
        Self::entry(name)?.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => ApiError::NoToken,
            _ => ApiError::Keyring(e.to_string()),
        })
    }

    /// Store both tokens
    pub fn set_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), ApiError> {
        Self::entry(ACCESS_TOKEN_ENTRY)?
            .set_password(access)
            .map_err(|e| ApiError::Keyring(e.to_string()))?;

        if let Some(refresh) = refresh {
            Self::entry(REFRESH_TOKEN_ENTRY)?
                .set_password(refresh)
                .map_err(|e| ApiError::Keyring(e.to_string()))?;
        }
        Ok(())
    }

    /// Remove both tokens. Missing entries are not an error.
    pub fn clear(&self) -> Result<(), ApiError> {
        for name in [ACCESS_TOKEN_ENTRY, REFRESH_TOKEN_ENTRY] {
            match Self::entry(name)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(ApiError::Keyring(e.to_string())),
            }
        }
        Ok(())
    }
}

impl TokenProvider for TokenStore {
    fn access_token(&self) -> Option<String> {
        match Self::read(ACCESS_TOKEN_ENTRY) {
            Ok(token) => Some(token),
            Err(ApiError::NoToken) => None,
            Err(e) => {
                tracing::warn!("Could not read access token: {}", e);
                None
            }
        }
    }
}

/// Fixed token, for tests and one-off invocations
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Check whether a JWT's `exp` claim is in the past
///
/// Tokens that can't be decoded count as expired.
pub fn is_token_expired(token: &str) -> bool {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    token_expiry(token).is_none_or(|exp| now >= exp)
}

/// Read the `exp` claim from a JWT payload
fn token_expiry(token: &str) -> Option<u64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_u64()
}

/// Mask a token for display (first and last 4 chars)
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 12 {
        return "*".repeat(len);
    }
    let head: String = token.chars().take(4).collect();
    let tail: String = token.chars().skip(len - 4).collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: u64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn future_token_is_not_expired() {
        assert!(!is_token_expired(&jwt_with_exp(u64::MAX / 2)));
    }

    #[test]
    fn past_token_is_expired() {
        assert!(is_token_expired(&jwt_with_exp(1_000)));
    }

    #[test]
    fn malformed_token_is_expired() {
        assert!(is_token_expired("not-a-jwt"));
        assert!(is_token_expired("a.!!!.c"));
    }

    #[test]
    fn mask_token_hides_middle() {
        let masked = mask_token("eyJhbGciOiJIUzI1NiJ9.payload.sig");
        assert!(masked.starts_with("eyJh"));
        assert!(masked.ends_with(".sig"));
        assert!(masked.contains("..."));
        assert_eq!(mask_token("short"), "*****");
    }

    #[test]
    fn mask_token_counts_chars_not_bytes() {
        assert_eq!(mask_token("aéééééééé"), "*********");
        assert_eq!(mask_token("ééééxxxxxxxxxxüüüü"), "éééé...üüüü");
    }

    #[test]
    fn static_token_provides_value() {
        assert_eq!(StaticToken(Some("t".into())).access_token(), Some("t".into()));
        assert_eq!(StaticToken(None).access_token(), None);
    }
}
