//! Notes API error types
//!
//! Errors raised while talking to the remote notes service or while
//! validating a note before it is sent.
//!
//! # Error Types
//!
//! - **`Http`**: transport failures from the underlying `reqwest` client
//! - **`Status`**: the service answered with a non-success status code
//! - **`Decode`**: the response body was not the JSON we expected
//! - **`Validation`**: a note was rejected locally before any request

use thiserror::Error;

/// Notes API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport level failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service responded with an error status
    #[error("Notes service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Response body could not be decoded
    #[error("Error while decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Note failed local validation
    #[error("Invalid note: {0}")]
    Validation(String),
}

impl ApiError {
    /// Whether the service rejected our credentials
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
