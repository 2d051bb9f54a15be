//! Text-analysis client error types.

use std::sync::Arc;

use pagelens_core::Error;

/// Errors from the text-analysis service.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// No API key configured.
    #[error("missing API key: PAGELENS_GEMINI_API_KEY not set")]
    MissingApiKey,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Quota or rate limit exhausted.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service answered without any text (e.g. blocked by safety filters).
    #[error("empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { InsightError::Timeout } else { InsightError::Network(Arc::new(err.without_url())) }
    }
}

impl From<InsightError> for Error {
    fn from(err: InsightError) -> Self {
        Error::InsightUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InsightError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = InsightError::HttpError { status: 500 };
        assert_eq!(err.to_string(), "HTTP error: 500");
    }

    #[test]
    fn test_maps_to_insight_unavailable() {
        let err: Error = InsightError::RateLimited.into();
        assert!(matches!(err, Error::InsightUnavailable(_)));
        assert_eq!(err.to_string(), "INSIGHT_UNAVAILABLE: rate limited: too many requests");
        assert!(!err.is_fetch_failure());
    }
}
