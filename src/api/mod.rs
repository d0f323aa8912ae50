//! Remote notes service access
//!
//! This module defines the wire types, the `NotesSource` seam the rest of
//! the crate fetches through, and the HTTP implementation of it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │  query::FetchWorker      │
//! └────────────┬─────────────┘
//!              │ NotesSource
//!          ┌───┴─────────────┐
//!          ▼                 ▼
//! ┌─────────────────┐ ┌──────────────┐
//! │ HttpNotesClient │ │ test doubles │
//! │    (reqwest)    │ │              │
//! └─────────────────┘ └──────────────┘
//! ```

mod client;
pub mod error;
mod types;

pub use client::{HttpNotesClient, list_params};
pub use error::ApiError;
pub use types::{
    CONTENT_MAX_CHARS, NewNote, Note, NoteTag, NotesPage, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};

/// Source of notes
///
/// Implementations must be shareable across the worker thread.
pub trait NotesSource: Send + Sync {
    /// Fetch one page of notes
    ///
    /// `tag` of `None` or `Some("")` means no tag filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is malformed.
    fn fetch_notes(&self, query: &str, page: u32, tag: Option<&str>) -> Result<NotesPage, ApiError>;

    /// Create a note and return it as stored by the service
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if validation, the request, or decoding fails.
    fn create_note(&self, note: &NewNote) -> Result<Note, ApiError>;
}
