//! Error type for the CAMS HTTP client.

/// Errors surfaced by the catalog transport layer.
///
/// The control plane treats `NotFound` as a terminal resolution failure and
/// passes everything else through untouched; `is_retryable` tells callers
/// which faults are transient.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, DNS, TLS, or timeout failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication failed (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Rate limited by the service (429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Server-side failure (5xx).
    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Any other unexpected status.
    #[error("unexpected status ({status}): {message}")]
    Unexpected { status: u16, message: String },

    /// The service answered 2xx but the body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client misconfiguration detected before any request was sent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns true for transient faults a caller may retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::ServerError { status, .. } => *status >= 500,
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let err = ClientError::ServerError {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert!(err.is_retryable());
        assert!(ClientError::RateLimited("slow down".to_string()).is_retryable());
    }

    #[test]
    fn terminal_errors_are_not_retryable() {
        assert!(!ClientError::NotFound("asset a1".to_string()).is_retryable());
        assert!(!ClientError::Unauthorized("bad token".to_string()).is_retryable());
        assert!(!ClientError::Config("missing base url".to_string()).is_retryable());
    }
}
