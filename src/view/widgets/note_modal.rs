//! Create-note modal: form state and overlay widget
//!
//! Title and content are free text, the tag cycles through [`NoteTag`].
//! Validation mirrors the notes service so most bad input never leaves
//! the terminal.

use super::text_field::TextField;
use crate::api::{NewNote, NoteTag, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
    Tag,
}

impl FormField {
    const ORDER: [Self; 3] = [Self::Title, Self::Content, Self::Tag];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous field, wrapping around
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State of the create-note form
#[derive(Debug, Clone, Default)]
pub struct NoteFormState {
    pub title: TextField,
    pub content: TextField,
    pub tag: NoteTag,
    pub focus: FormField,
    /// Validation or submission errors to show under the fields
    pub errors: Vec<String>,
    /// A creation request is in flight
    pub submitting: bool,
}

impl NoteFormState {
    /// Focused text field, `None` when the tag selector has focus
    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Content => Some(&mut self.content),
            FormField::Tag => None,
        }
    }

    /// Move focus forward (Tab)
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus backward (Shift+Tab)
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type a character into the focused field
    ///
    /// Space on the tag selector cycles the tag.
    pub fn insert(&mut self, c: char) {
        match self.focused_field() {
            Some(field) => field.insert(c),
            None if c == ' ' => self.tag = self.tag.next(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            field.backspace();
        }
    }

    pub fn delete(&mut self) {
        if let Some(field) = self.focused_field() {
            field.delete();
        }
    }

    /// Left arrow: move the text cursor, or pick the previous tag
    pub fn left(&mut self) {
        match self.focused_field() {
            Some(field) => field.cursor_left(),
            None => self.tag = self.tag.prev(),
        }
    }

    /// Right arrow: move the text cursor, or pick the next tag
    pub fn right(&mut self) {
        match self.focused_field() {
            Some(field) => field.cursor_right(),
            None => self.tag = self.tag.next(),
        }
    }

    pub fn home(&mut self) {
        if let Some(field) = self.focused_field() {
            field.cursor_home();
        }
    }

    pub fn end(&mut self) {
        if let Some(field) = self.focused_field() {
            field.cursor_end();
        }
    }

    /// Current form contents as a payload
    #[must_use]
    pub fn to_note(&self) -> NewNote {
        NewNote::new(self.title.text(), self.content.text(), self.tag)
    }

    /// Validate and lock the form for submission
    ///
    /// Returns the payload to send, or `None` if the form is invalid or a
    /// submission is already pending.
    pub fn submit(&mut self) -> Option<NewNote> {
        if self.submitting {
            return None;
        }
        let note = self.to_note();
        self.errors = note.violations();
        if !self.errors.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(note)
    }

    /// Unlock the form after a failed submission
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.errors = vec![message.into()];
    }
}

/// Modal overlay rendering a [`NoteFormState`]
pub struct NoteModal<'a> {
    form: &'a NoteFormState,
    theme: &'a Theme,
}

impl<'a> NoteModal<'a> {
    #[must_use]
    pub const fn new(form: &'a NoteFormState, theme: &'a Theme) -> Self {
        Self { form, theme }
    }

    /// Calculate centered area for the modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }

    fn field_block(&self, title: String, focused: bool) -> Block<'static> {
        let style = if focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title)
    }

    fn field_line(&self, field: &TextField, focused: bool, width: usize) -> Line<'static> {
        if !focused {
            return Line::raw(field.text().to_string());
        }
        let (visible, offset) = field.window(width);
        let before: String = visible.chars().take(offset).collect();
        let at: String = visible.chars().skip(offset).take(1).collect();
        let after: String = visible.chars().skip(offset + 1).collect();
        let at = if at.is_empty() { " ".to_string() } else { at };

        Line::from(vec![
            Span::raw(before),
            Span::styled(
                at,
                Style::default()
                    .bg(self.theme.cursor)
                    .fg(self.theme.selection_fg)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::raw(after),
        ])
    }

    fn render_text_field(
        &self,
        field: &TextField,
        label: &str,
        max: usize,
        focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let title = format!(" {label} ({}/{max}) ", field.len_chars());
        let block = self.field_block(title, focused);
        let inner = block.inner(area);
        block.render(area, buf);
        let line = self.field_line(field, focused, inner.width as usize);
        Paragraph::new(line).render(inner, buf);
    }

    fn render_tag(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.form.focus == FormField::Tag;
        let block = self.field_block(" Tag ".to_string(), focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (i, tag) in NoteTag::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if *tag == self.form.tag {
                spans.push(Span::styled(
                    format!("[{tag}]"),
                    self.theme.tag_style().add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(format!(" {tag} "), self.theme.dimmed_style()));
            }
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

impl Widget for NoteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 64.min(area.width.saturating_sub(4));
        #[allow(clippy::cast_possible_truncation)]
        let error_height = self.form.errors.len().min(3) as u16;
        // borders 2 + title 3 + content 3 + tag 3 + errors + help 1
        let height = 12 + error_height;

        let modal_area = Self::centered_rect(width, height, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Create note ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Length(1),
        ])
        .split(inner);

        self.render_text_field(
            &self.form.title,
            "Title",
            TITLE_MAX_CHARS,
            self.form.focus == FormField::Title,
            chunks[0],
            buf,
        );
        self.render_text_field(
            &self.form.content,
            "Content",
            CONTENT_MAX_CHARS,
            self.form.focus == FormField::Content,
            chunks[1],
            buf,
        );
        self.render_tag(chunks[2], buf);

        if error_height > 0 {
            let lines: Vec<Line> = self
                .form
                .errors
                .iter()
                .take(3)
                .map(|e| Line::styled(format!("✗ {e}"), self.theme.error_style()))
                .collect();
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(chunks[3], buf);
        }

        let help = if self.form.submitting {
            "Creating note..."
        } else {
            "Tab: next field | ←→: tag | Enter: create | Esc: cancel"
        };
        Paragraph::new(help)
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(title: &str, content: &str) -> NoteFormState {
        let mut form = NoteFormState::default();
        form.title.set(title);
        form.content.set(content);
        form
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = NoteFormState::default();
        assert_eq!(form.focus, FormField::Title);
        form.focus_next();
        assert_eq!(form.focus, FormField::Content);
        form.focus_next();
        assert_eq!(form.focus, FormField::Tag);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Tag);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = NoteFormState::default();
        form.insert('h');
        form.insert('i');
        form.focus_next();
        form.insert('x');

        assert_eq!(form.title.text(), "hi");
        assert_eq!(form.content.text(), "x");
    }

    #[test]
    fn test_tag_selector_cycles() {
        let mut form = NoteFormState::default();
        form.focus = FormField::Tag;

        form.right();
        assert_eq!(form.tag, NoteTag::Work);
        form.left();
        form.left();
        assert_eq!(form.tag, NoteTag::Shopping);
        form.insert(' ');
        assert_eq!(form.tag, NoteTag::Todo);
        form.insert('a');
        assert_eq!(form.tag, NoteTag::Todo);
    }

    #[test]
    fn test_submit_invalid_form_shows_errors() {
        let mut form = form_with("ab", "");
        assert!(form.submit().is_none());
        assert_eq!(form.errors.len(), 1);
        assert!(!form.submitting);
    }

    #[test]
    fn test_submit_valid_form_locks() {
        let mut form = form_with("Plan week", "Monday: gym");
        form.tag = NoteTag::Personal;

        let note = form.submit().unwrap();
        assert_eq!(note, NewNote::new("Plan week", "Monday: gym", NoteTag::Personal));
        assert!(form.submitting);
        assert!(form.errors.is_empty());

        // Second submit while pending is ignored
        assert!(form.submit().is_none());
    }

    #[test]
    fn test_fail_unlocks_form() {
        let mut form = form_with("Plan week", "");
        form.submit().unwrap();
        form.fail("Notes service returned 500: oops");

        assert!(!form.submitting);
        assert_eq!(form.errors, vec!["Notes service returned 500: oops".to_string()]);
        assert!(form.submit().is_some());
    }
}
