//! Noteboard - a terminal client for a remote notes service
//!
//! The library is split along the flow of a search:
//!
//! - [`api`]: note types and the HTTP client behind the [`api::NotesSource`] trait
//! - [`query`]: debounce, cache keys, the shared page cache and the fetch worker
//! - [`view`]: the ratatui notes view (search box, list, pagination, modal)
//! - [`commands`]: CLI command handlers built on the above

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod query;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum NoteboardError {
    /// Notes service error
    #[error("Notes API error: {0}")]
    Api(#[from] api::ApiError),
    /// Terminal view error
    #[error("View error: {0}")]
    Ui(#[from] view::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used across noteboard
pub type Result<T> = std::result::Result<T, NoteboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_keeps_message() {
        let err: NoteboardError = api::ApiError::Validation("Title is required".into()).into();
        assert_eq!(err.to_string(), "Notes API error: Invalid note: Title is required");

        let err: NoteboardError = std::io::Error::other("disk full").into();
        assert!(matches!(err, NoteboardError::Io(_)));
    }
}
