//! Error types for the Tempo API client.
//!
//! # Design
//! Every non-2xx response lands in `Http` with the raw status code and body,
//! untouched, so callers can inspect Tempo's own error payload. Failures that
//! never produced a response (DNS, refused connection, timeout) land in
//! `Transport`. Neither kind is retried.

use thiserror::Error;

/// Errors returned by `TempoClient` and its helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never completed: connection, DNS, TLS or timeout failure.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A date value could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The base URL or a pagination cursor is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A construction parameter is missing or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_status_and_body() {
        let err = ApiError::Http {
            status: 403,
            body: r#"{"errors":[{"message":"forbidden"}]}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"HTTP 403: {"errors":[{"message":"forbidden"}]}"#
        );
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_not_found());
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_detected() {
        let err = ApiError::Http {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }
}
