//! Create command - post a new note

use crate::{
    Result,
    api::{NewNote, Note, NotesSource},
    output::{OutputWriter, note_detail},
};

/// Execute the create command
///
/// The note is validated locally before anything is sent.
///
/// # Errors
///
/// Returns `NoteboardError::Api` if validation fails or the service rejects
/// the note.
pub fn execute(
    source: &dyn NotesSource,
    note: &NewNote,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<Note> {
    note.validate()?;
    let created = source.create_note(note)?;
    tracing::info!(id = %created.id, "note created");

    if quiet {
        out.write(&created.id);
    } else {
        out.success(&format!("Created note \"{}\"", created.title));
        out.info(&note_detail(&created));
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoteboardError;
    use crate::api::{ApiError, NoteTag};
    use crate::output::{BufferWriter, MessageLevel};
    use crate::testing::MockSource;

    #[test]
    fn test_create_posts_valid_note() {
        let source = MockSource::default();
        let out = BufferWriter::new();
        let note = NewNote::new("Standup", "9:30 daily", NoteTag::Meeting);

        let created = execute(&source, &note, &out, false).unwrap();

        assert_eq!(created.title, "Standup");
        assert_eq!(source.created(), vec![note]);
        assert_eq!(out.messages()[0].0, MessageLevel::Success);
    }

    #[test]
    fn test_create_rejects_invalid_note_without_request() {
        let source = MockSource::default();
        let out = BufferWriter::new();
        let note = NewNote::new("ab", "", NoteTag::Todo);

        let err = execute(&source, &note, &out, false).unwrap_err();

        assert!(matches!(err, NoteboardError::Api(ApiError::Validation(_))));
        assert!(source.created().is_empty());
    }

    #[test]
    fn test_create_quiet_prints_id() {
        let source = MockSource::default();
        let out = BufferWriter::new();
        execute(&source, &NewNote::new("Groceries", "", NoteTag::Shopping), &out, true).unwrap();
        assert_eq!(out.messages(), vec![(MessageLevel::Normal, "new-1".to_string())]);
    }
}
