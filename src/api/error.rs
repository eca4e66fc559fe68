//! Error types for the LMS API client

use thiserror::Error;

/// Errors that can occur when talking to the LMS backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned a non-success response
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, or the status line
        message: String,
    },

    /// Access token was rejected as expired
    #[error("Access token expired. Run `coursetrack token` to store a new one")]
    TokenExpired,

    /// No access token stored
    #[error("No access token stored. Run `coursetrack token <access-token>`")]
    NoToken,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    Keyring(String),

    /// Base URL can't take path segments
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Should the request be attempted again?
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(e) => !e.is_builder() && !e.is_decode(),
            ApiError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Does the user need to provide new credentials?
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            ApiError::TokenExpired | ApiError::NoToken | ApiError::Api { status: 401, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_and_rate_limits_are_retryable() {
        assert!(ApiError::Api { status: 503, message: String::new() }.is_retryable());
        assert!(ApiError::Api { status: 429, message: String::new() }.is_retryable());
        assert!(!ApiError::Api { status: 404, message: String::new() }.is_retryable());
        assert!(!ApiError::TokenExpired.is_retryable());
    }

    #[test]
    fn auth_failures_require_reauth() {
        assert!(ApiError::TokenExpired.requires_reauth());
        assert!(ApiError::Api { status: 401, message: String::new() }.requires_reauth());
        assert!(!ApiError::Api { status: 500, message: String::new() }.requires_reauth());
    }

    #[test]
    fn api_error_message_includes_status() {
        let err = ApiError::Api { status: 404, message: "Course not found".into() };
        assert_eq!(err.to_string(), "API error (404): Course not found");
    }
}
