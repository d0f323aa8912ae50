//! Testing utilities for noteboard
//!
//! This module provides a `MockSource` standing in for the notes service and
//! a few note fixtures.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ApiError, NewNote, Note, NotesPage, NotesSource};
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

/// Arguments of one `fetch_notes` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub query: String,
    pub page: u32,
    pub tag: Option<String>,
}

/// In-memory `NotesSource` that records every call
///
/// # Examples
/// ```ignore
/// let source = MockSource::with_page(sample_page(5, 3));
/// let page = source.fetch_notes("", 1, None).unwrap();
/// assert_eq!(page.notes.len(), 5);
/// assert_eq!(source.fetch_calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    page: NotesPage,
    fail_status: Option<u16>,
    fetch_calls: Mutex<Vec<FetchCall>>,
    created: Mutex<Vec<NewNote>>,
}

impl MockSource {
    /// Source answering every fetch with `page`
    #[must_use]
    pub fn with_page(page: NotesPage) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Source failing every request with the given status code
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    /// Recorded fetch calls, oldest first
    ///
    /// # Panics
    /// Panics if the call log mutex is poisoned.
    #[must_use]
    pub fn fetch_calls(&self) -> Vec<FetchCall> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Notes passed to `create_note`, oldest first
    ///
    /// # Panics
    /// Panics if the creation log mutex is poisoned.
    #[must_use]
    pub fn created(&self) -> Vec<NewNote> {
        self.created.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<ApiError> {
        self.fail_status.map(|status| ApiError::Status {
            status,
            body: "mock failure".to_string(),
        })
    }
}

impl NotesSource for MockSource {
    fn fetch_notes(&self, query: &str, page: u32, tag: Option<&str>) -> Result<NotesPage, ApiError> {
        self.fetch_calls.lock().unwrap().push(FetchCall {
            query: query.to_string(),
            page,
            tag: tag.map(str::to_string),
        });
        match self.failure() {
            Some(e) => Err(e),
            None => Ok(self.page.clone()),
        }
    }

    fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        note.validate()?;
        if let Some(e) = self.failure() {
            return Err(e);
        }
        let mut created = self.created.lock().unwrap();
        created.push(note.clone());
        let mut stored = sample_note(created.len());
        stored.id = format!("new-{}", created.len());
        stored.title.clone_from(&note.title);
        stored.content.clone_from(&note.content);
        stored.tag = note.tag.as_str().to_string();
        Ok(stored)
    }
}

/// A deterministic note fixture
///
/// # Panics
/// Never in practice: the timestamp is a fixed valid date.
#[must_use]
pub fn sample_note(i: usize) -> Note {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    Note {
        id: format!("note-{i}"),
        title: format!("Note {i}"),
        content: format!("Content of note {i}\nsecond line"),
        tag: "Todo".to_string(),
        created_at: created,
        updated_at: created,
    }
}

/// A page of `count` fixture notes out of `total_pages`
#[must_use]
pub fn sample_page(count: usize, total_pages: u32) -> NotesPage {
    NotesPage::new((0..count).map(sample_note).collect(), total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoteTag;

    #[test]
    fn test_mock_records_fetch_calls() {
        let source = MockSource::with_page(sample_page(2, 1));
        let page = source.fetch_notes("q", 3, Some("Work")).unwrap();

        assert_eq!(page.notes.len(), 2);
        assert_eq!(
            source.fetch_calls(),
            vec![FetchCall {
                query: "q".into(),
                page: 3,
                tag: Some("Work".into()),
            }]
        );
    }

    #[test]
    fn test_mock_failure() {
        let source = MockSource::failing(500);
        assert!(source.fetch_notes("", 1, None).is_err());
        assert_eq!(source.fetch_calls().len(), 1);
    }

    #[test]
    fn test_mock_create_validates() {
        let source = MockSource::default();
        assert!(source.create_note(&NewNote::new("", "", NoteTag::Todo)).is_err());
        assert!(source.created().is_empty());

        let note = source
            .create_note(&NewNote::new("Valid", "", NoteTag::Work))
            .unwrap();
        assert_eq!(note.id, "new-1");
        assert_eq!(note.tag, "Work");
    }

    #[test]
    fn test_sample_page() {
        let page = sample_page(5, 3);
        assert_eq!(page.notes.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notes[4].id, "note-4");
    }
}
