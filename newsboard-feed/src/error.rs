//! Error types for the feed module

use thiserror::Error;

/// Errors that can occur while fetching one keyword's feed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Feed host returned a non-success status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Body was neither RSS nor Atom
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Invalid configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON in {field}: {error}")]
    InvalidJson { field: String, error: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("NEWS_KEYWORDS cannot be empty")]
    EmptyKeywordList,

    #[error("Feed URL template must contain {{query}}: {0}")]
    MissingQueryPlaceholder(String),
}
