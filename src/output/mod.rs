//! Output formatting for CLI display
//!
//! Plain-text renderings of notes and pages for the `list` and `create`
//! commands, plus the [`OutputWriter`] abstraction they print through.

mod writer;

pub use writer::{BufferWriter, MessageLevel, OutputWriter, StdoutWriter};

use crate::api::{Note, NotesPage};
use colored::Colorize;

/// Timestamp format used wherever a note date is shown
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// First line of a note's content, cut to `max` characters
#[must_use]
pub fn excerpt(content: &str, max: usize) -> String {
    let first = content.lines().next().unwrap_or_default();
    if first.chars().count() <= max {
        first.to_string()
    } else {
        let cut: String = first.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Format a note as one list line
#[must_use]
pub fn note_line(note: &Note, quiet: bool) -> String {
    if quiet {
        return note.id.clone();
    }
    let content = excerpt(&note.content, 48);
    if content.is_empty() {
        format!("  {} [{}]", note.title.bold(), note.tag.magenta())
    } else {
        format!(
            "  {} [{}] {}",
            note.title.bold(),
            note.tag.magenta(),
            content.dimmed()
        )
    }
}

/// Footer under a printed page
#[must_use]
pub fn page_footer(page: u32, total_pages: u32) -> String {
    format!("Page {page} of {}", total_pages.max(1))
}

/// Print a page of notes through `output`
pub fn print_page(output: &dyn OutputWriter, page: &NotesPage, current: u32, quiet: bool) {
    if page.is_empty() {
        output.info("No notes found");
        return;
    }
    for note in &page.notes {
        output.write(&note_line(note, quiet));
    }
    if !quiet {
        output.info(&page_footer(current, page.total_pages));
    }
}

/// Multi-line description of a single note
#[must_use]
pub fn note_detail(note: &Note) -> String {
    format!(
        "{} [{}]\nid: {}\ncreated: {}\n\n{}",
        note.title,
        note.tag,
        note.id,
        note.created_at.format(DATE_FORMAT),
        note.content
    )
}
