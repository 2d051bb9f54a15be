//! Unified error types for pagelens.
//!
//! Each variant carries a stable code prefix in its display text so that
//! failure descriptions stored in a `ScrapeResult` stay greppable.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the pagelens pipeline and its stores.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL list).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Input could not be normalized into a fetchable URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response or network failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Browser fetch was selected but rendering is disabled.
    #[error("RENDER_DISABLED")]
    RenderDisabled,

    /// Browser launch or navigation failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// The text-analysis service could not produce an insight.
    #[error("INSIGHT_UNAVAILABLE: {0}")]
    InsightUnavailable(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Schema bootstrap failed.
    #[error("CACHE_ERROR: schema setup failed: {0}")]
    SchemaFailed(String),

    /// A cached value could not be encoded or decoded.
    #[error("CACHE_ERROR: codec: {0}")]
    Codec(String),

    /// The ephemeral store rejected an operation.
    #[error("CACHE_ERROR: ephemeral store: {0}")]
    Ephemeral(String),

    /// Writing the durable table to a file failed.
    #[error("EXPORT_FAILED: {0}")]
    Export(String),
}

impl Error {
    /// Whether this error belongs to the fetch family (network, timeout, browser).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::FetchTimeout(_)
                | Error::FetchTooLarge(_)
                | Error::HttpError(_)
                | Error::RenderDisabled
                | Error::RenderFailed(_)
        )
    }

    /// Whether this error came from one of the cache tiers.
    pub fn is_cache_failure(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::SchemaFailed(_) | Error::Codec(_) | Error::Ephemeral(_)
        )
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Codec(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::RenderDisabled => (-32011, "Render mode is disabled".to_string()),
            Error::RenderFailed(msg) => (-32012, msg.clone()),
            Error::InsightUnavailable(msg) => (-32013, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::SchemaFailed(msg) | Error::Codec(msg) | Error::Ephemeral(msg) => (-32002, msg.clone()),
            Error::Export(msg) => (-32014, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
