//! Wire types for the notes service
//!
//! The service speaks camelCase JSON. Timestamps are RFC 3339 strings and are
//! decoded straight into `chrono` values.

use super::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum title length accepted by the service
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length accepted by the service
pub const TITLE_MAX_CHARS: usize = 50;
/// Maximum content length accepted by the service
pub const CONTENT_MAX_CHARS: usize = 500;

/// A single note as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Kept as a plain string so unknown tags still decode
    pub tag: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of notes plus the total page count for the current filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

impl NotesPage {
    /// Create a new page
    #[must_use]
    pub const fn new(notes: Vec<Note>, total_pages: u32) -> Self {
        Self { notes, total_pages }
    }

    /// Whether the page holds no notes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Tags the service accepts when creating a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// All tags, in display order
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::Work,
        Self::Personal,
        Self::Meeting,
        Self::Shopping,
    ];

    /// Wire name of the tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Meeting => "Meeting",
            Self::Shopping => "Shopping",
        }
    }

    /// Next tag, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tag, wrapping around
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                format!("unknown tag '{s}' (expected one of: {})", valid.join(", "))
            })
    }
}

/// Payload for creating a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NewNote {
    /// Create a new note payload
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: NoteTag) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag,
        }
    }

    /// Check the payload against the service's rules
    ///
    /// Returns every violated rule, one message per field.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let title_len = self.title.chars().count();
        if title_len == 0 {
            errors.push("Title is required".to_string());
        } else if title_len < TITLE_MIN_CHARS {
            errors.push(format!("Title must be at least {TITLE_MIN_CHARS} characters"));
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(format!("Title must be at most {TITLE_MAX_CHARS} characters"));
        }

        if self.content.chars().count() > CONTENT_MAX_CHARS {
            errors.push(format!(
                "Content must be at most {CONTENT_MAX_CHARS} characters"
            ));
        }

        errors
    }

    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` joining all violated rules.
    pub fn validate(&self) -> Result<(), ApiError> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decodes_camel_case() {
        let json = r#"{
            "notes": [{
                "id": "abc",
                "title": "Groceries",
                "content": "milk",
                "tag": "Shopping",
                "createdAt": "2025-01-02T10:00:00.000Z",
                "updatedAt": "2025-01-02T11:30:00Z"
            }],
            "totalPages": 4
        }"#;

        let page: NotesPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.notes.len(), 1);
        assert_eq!(page.notes[0].title, "Groceries");
        assert_eq!(page.notes[0].tag, "Shopping");
    }

    #[test]
    fn test_note_without_content_decodes() {
        let json = r#"{
            "id": "1", "title": "Empty", "tag": "Todo",
            "createdAt": "2025-01-02T10:00:00Z", "updatedAt": "2025-01-02T10:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert!(note.content.is_empty());
    }

    #[test]
    fn test_tag_cycle() {
        assert_eq!(NoteTag::Todo.next(), NoteTag::Work);
        assert_eq!(NoteTag::Shopping.next(), NoteTag::Todo);
        assert_eq!(NoteTag::Todo.prev(), NoteTag::Shopping);
        assert_eq!(NoteTag::Work.prev(), NoteTag::Todo);
    }

    #[test]
    fn test_tag_from_str_is_case_insensitive() {
        assert_eq!("work".parse::<NoteTag>(), Ok(NoteTag::Work));
        assert_eq!(" MEETING ".parse::<NoteTag>(), Ok(NoteTag::Meeting));
        assert!("all".parse::<NoteTag>().is_err());
    }

    #[test]
    fn test_new_note_serializes_tag_name() {
        let note = NewNote::new("Title", "Body", NoteTag::Personal);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["tag"], "Personal");
        assert_eq!(json["title"], "Title");
    }

    #[test]
    fn test_title_length_boundaries() {
        let too_short = NewNote::new("ab", "", NoteTag::Todo);
        let shortest = NewNote::new("abc", "", NoteTag::Todo);
        let longest = NewNote::new("a".repeat(TITLE_MAX_CHARS), "", NoteTag::Todo);
        let too_long = NewNote::new("a".repeat(TITLE_MAX_CHARS + 1), "", NoteTag::Todo);

        assert_eq!(too_short.violations().len(), 1);
        assert!(shortest.validate().is_ok());
        assert!(longest.validate().is_ok());
        assert_eq!(too_long.violations().len(), 1);
    }

    #[test]
    fn test_empty_title_is_required() {
        let note = NewNote::new("", "", NoteTag::Todo);
        assert_eq!(note.violations(), vec!["Title is required".to_string()]);
    }

    #[test]
    fn test_content_length_boundary() {
        let ok = NewNote::new("Title", "x".repeat(CONTENT_MAX_CHARS), NoteTag::Todo);
        let too_long = NewNote::new("Title", "x".repeat(CONTENT_MAX_CHARS + 1), NoteTag::Todo);

        assert!(ok.validate().is_ok());
        let err = too_long.validate().unwrap_err();
        assert!(err.to_string().contains("Content must be at most 500"));
    }

    #[test]
    fn test_violations_are_combined() {
        let note = NewNote::new("a", "x".repeat(CONTENT_MAX_CHARS + 1), NoteTag::Todo);
        let err = note.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Title"));
        assert!(msg.contains("Content"));
    }
}
