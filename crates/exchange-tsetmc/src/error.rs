//! Error types for the TSETMC feed.
//!
//! Every variant here is cycle-fatal: the refresh loop aborts the current
//! cycle and keeps the previous snapshot. Row-level problems never surface
//! as errors.

use thiserror::Error;

/// Errors that can occur while fetching or splitting the market-watch feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Endpoint answered with a non-success status.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// Body lacks the expected top-level structure.
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FeedError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// True for failures of the transport rather than of the payload.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_) | Self::Api { .. })
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_construction() {
        let err = FeedError::api(503, "service unavailable");
        assert!(matches!(
            err,
            FeedError::Api {
                status_code: 503,
                ..
            }
        ));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("service unavailable"));
    }

    #[test]
    fn test_transport_classification() {
        assert!(FeedError::Network("refused".to_string()).is_transport());
        assert!(FeedError::Timeout("10s".to_string()).is_transport());
        assert!(FeedError::api(500, "").is_transport());
        assert!(!FeedError::MalformedFeed("no rows".to_string()).is_transport());
        assert!(!FeedError::Configuration("bad url".to_string()).is_transport());
    }

    #[test]
    fn test_error_display_malformed() {
        let err = FeedError::MalformedFeed("expected 3 segments, got 1".to_string());
        let display = err.to_string();
        assert!(display.contains("malformed"));
        assert!(display.contains("got 1"));
    }
}
