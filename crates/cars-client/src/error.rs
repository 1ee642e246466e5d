//! Error types for building a resource client

use thiserror::Error;

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while setting up a client or test server.
///
/// Failures of individual fetches are reported as
/// [`FetchError`](cars_core::FetchError) instead.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Base URL cannot carry a path (e.g. `mailto:`)
    #[error("URL cannot be used as an API base: {0}")]
    UnsupportedBaseUrl(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
