//! Search bar widget for query input

use super::text_field::TextField;
use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PLACEHOLDER: &str = "Search notes";

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    field: &'a TextField,
    theme: &'a Theme,
    focused: bool,
    /// An edit is still inside the debounce window
    pending: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(field: &'a TextField, theme: &'a Theme) -> Self {
        Self {
            field,
            theme,
            focused: true,
            pending: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Mark the query as not yet applied
    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let title = if self.pending { " Search … " } else { " Search " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor_style = Style::default().add_modifier(Modifier::SLOW_BLINK);
        let mut spans = vec![Span::styled("/", self.theme.dimmed_style()), Span::raw(" ")];

        if self.field.is_empty() {
            if self.focused {
                spans.push(Span::styled("│", cursor_style));
            }
            spans.push(Span::styled(PLACEHOLDER, self.theme.dimmed_style()));
        } else {
            let width = (inner.width as usize).saturating_sub(3);
            let (visible, offset) = self.field.window(width);
            let before: String = visible.chars().take(offset).collect();
            let after: String = visible.chars().skip(offset).collect();
            spans.push(Span::raw(before));
            if self.focused {
                spans.push(Span::styled("│", cursor_style));
            }
            spans.push(Span::raw(after));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
