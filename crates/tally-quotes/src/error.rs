//! Error types for quote source operations.

use thiserror::Error;

/// Errors a quote source may report when a fetch fails.
///
/// Consumers of a [`crate::QuoteSource`] treat every variant the same way
/// (the ticker is unpriced for the cycle); the taxonomy exists for source
/// implementors and their diagnostics.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Connection to the upstream provider failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Rate limited by the provider
    #[error("rate limited")]
    RateLimited,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for QuoteError {
    fn from(e: std::io::Error) -> Self {
        QuoteError::IoError(e.to_string())
    }
}
