//! View error types

use thiserror::Error;

/// Errors that can occur while running the notes view
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal I/O failed (raw mode, alternate screen, drawing)
    #[error("Terminal error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for view operations
pub type Result<T> = std::result::Result<T, UiError>;
