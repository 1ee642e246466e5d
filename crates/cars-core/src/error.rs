//! Fetch error taxonomy shared by the client and the aggregator

use std::fmt;

use thiserror::Error;

/// Result type for a single resource fetch
pub type FetchResult<T> = Result<T, FetchError>;

/// The only failure text shown to end users, whatever went wrong underneath
pub const USER_FACING_FAILURE: &str = "Failed to fetch car data. Please try again later.";

/// Errors that can occur while fetching and decoding one remote resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// DNS, connection refused, reset, or any other network-level failure
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The transport layer gave up waiting for the response
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Upstream answered with anything other than 200
    #[error("Upstream returned HTTP {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        /// Upstream error message if the body carried one, else the reason phrase
        message: String,
    },

    /// Body was not valid JSON or did not match the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The fetch was abandoned because the enclosing aggregation already failed
    #[error("Fetch cancelled")]
    Cancelled,
}

/// Coarse classification of a [`FetchError`], used for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Transport,
    Status,
    Decode,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Transport => "transport",
            FailureKind::Status => "status",
            FailureKind::Decode => "decode",
            FailureKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FetchError {
    /// Create a status error from a status code and message
    pub fn status(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns the failure class. Transport timeouts count as transport failures.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport { .. } | FetchError::Timeout { .. } => FailureKind::Transport,
            FetchError::Status { .. } => FailureKind::Status,
            FetchError::Decode { .. } => FailureKind::Decode,
            FetchError::Cancelled => FailureKind::Cancelled,
        }
    }

    /// HTTP status code carried by a [`FetchError::Status`]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL the failing request was sent to, if one was issued
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => Some(url),
            FetchError::Cancelled => None,
        }
    }

    /// Generic message for end users; never leaks upstream topology
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }
}
