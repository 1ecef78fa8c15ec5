//! Error types for client operations.

use std::fmt;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection-level failure. Never retried.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service kept answering 429 until the retry budget ran out.
    #[error("rate limit exceeded after {attempts} attempts{hint}", hint = retry_hint(*.retry_after))]
    RateLimitExceeded {
        /// Last `Retry-After` value seen, in seconds.
        retry_after: Option<u64>,
        /// Number of requests issued.
        attempts: u32,
    },

    /// Any other non-2xx response. Never retried.
    #[error("API error {status} {status_text}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Reason phrase.
        status_text: String,
        /// Response body text.
        body: String,
    },

    /// A body was expected but the service answered without one.
    #[error("expected a response body but got status {0}")]
    EmptyResponse(u16),

    /// The response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid call arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns the HTTP status for [`Error::Api`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimitExceeded { .. } => Some(429),
            _ => None,
        }
    }
}

fn retry_hint(retry_after: Option<u64>) -> String {
    retry_after.map_or_else(String::new, |secs| format!(" (retry after {secs}s)"))
}

/// Connection-level failure reported by a [`Transport`](crate::Transport).
#[derive(Debug)]
pub struct TransportError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error with a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        Self::new(message).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_display() {
        let err = Error::RateLimitExceeded {
            retry_after: Some(12),
            attempts: 4,
        };
        assert_eq!(
            err.to_string(),
            "rate limit exceeded after 4 attempts (retry after 12s)"
        );

        let err = Error::RateLimitExceeded {
            retry_after: None,
            attempts: 1,
        };
        assert_eq!(err.to_string(), "rate limit exceeded after 1 attempts");
    }

    #[test]
    fn test_api_error_status() {
        let err = Error::Api {
            status: 404,
            status_text: "Not Found".into(),
            body: "{\"detail\":\"Not found.\"}".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().starts_with("API error 404 Not Found"));
    }

    #[test]
    fn test_transport_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = TransportError::new("connection failed").with_source(io);
        assert_eq!(err.message(), "connection failed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
