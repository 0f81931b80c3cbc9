//! Error types for the release post generation library.

use thiserror::Error;

/// Main error type for release post generation operations.
#[derive(Debug, Error)]
pub enum PostGenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// Type alias for Result with PostGenError
pub type Result<T> = std::result::Result<T, PostGenError>;
