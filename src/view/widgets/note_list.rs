//! Note list and preview widgets

use crate::api::Note;
use crate::output::{DATE_FORMAT, excerpt};
use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

/// Note list widget with a cursor indicator
pub struct NoteList<'a> {
    notes: &'a [Note],
    cursor: usize,
    scroll_offset: usize,
    theme: &'a Theme,
    /// The notes belong to a previous query and a newer page is loading
    placeholder: bool,
}

impl<'a> NoteList<'a> {
    /// Create a new note list widget
    #[must_use]
    pub const fn new(notes: &'a [Note], theme: &'a Theme) -> Self {
        Self {
            notes,
            cursor: 0,
            scroll_offset: 0,
            theme,
            placeholder: false,
        }
    }

    /// Set cursor and scroll position
    #[must_use]
    pub const fn position(mut self, cursor: usize, scroll_offset: usize) -> Self {
        self.cursor = cursor;
        self.scroll_offset = scroll_offset;
        self
    }

    #[must_use]
    pub const fn placeholder(mut self, placeholder: bool) -> Self {
        self.placeholder = placeholder;
        self
    }

    fn render_note(&self, note: &'a Note, width: usize, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let tag = format!("[{}]", note.tag);
        let title_style = if is_cursor {
            self.theme.selected_style()
        } else if self.placeholder {
            self.theme.dimmed_style()
        } else {
            self.theme.normal_style()
        };

        // cursor + spaces + tag + title
        let used = 3 + tag.chars().count() + note.title.chars().count();
        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(note.title.as_str(), title_style),
            Span::raw(" "),
            Span::styled(tag, self.theme.tag_style()),
        ];
        if width > used + 4 {
            let content = excerpt(&note.content, width - used - 2);
            if !content.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(content, self.theme.dimmed_style()));
            }
        }

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(self.theme.selected_style())
        } else {
            item
        }
    }
}

impl Widget for NoteList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.placeholder {
            format!(" Notes ({}) · updating ", self.notes.len())
        } else {
            format!(" Notes ({}) ", self.notes.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.notes.is_empty() {
            Paragraph::new(Line::styled("No notes found", self.theme.dimmed_style()))
                .render(inner, buf);
            return;
        }

        let visible_height = inner.height as usize;
        let width = inner.width as usize;
        let items: Vec<ListItem> = self
            .notes
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height)
            .map(|(idx, note)| self.render_note(note, width, idx == self.cursor))
            .collect();

        List::new(items).render(inner, buf);
    }
}

/// Full content of the highlighted note
pub struct NotePreview<'a> {
    note: Option<&'a Note>,
    theme: &'a Theme,
}

impl<'a> NotePreview<'a> {
    #[must_use]
    pub const fn new(note: Option<&'a Note>, theme: &'a Theme) -> Self {
        Self { note, theme }
    }
}

impl Widget for NotePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Preview ");

        let lines = match self.note {
            None => vec![Line::styled("No note selected", self.theme.dimmed_style())],
            Some(note) => {
                let mut lines = vec![
                    Line::styled(note.title.clone(), self.theme.cursor_style()),
                    Line::from(vec![
                        Span::styled(format!("#{}", note.tag), self.theme.tag_style()),
                        Span::styled(
                            format!("  {}", note.created_at.format(DATE_FORMAT)),
                            self.theme.dimmed_style(),
                        ),
                    ]),
                    Line::raw(""),
                ];
                if note.content.is_empty() {
                    lines.push(Line::styled("(no content)", self.theme.dimmed_style()));
                } else {
                    lines.extend(note.content.lines().map(|l| Line::raw(l.to_string())));
                }
                lines
            }
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
