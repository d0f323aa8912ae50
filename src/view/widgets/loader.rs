//! Loading indicator shown while no page is available

use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner, or the fetch error when the last request failed
pub struct Loader<'a> {
    tick: usize,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> Loader<'a> {
    #[must_use]
    pub const fn new(tick: usize, theme: &'a Theme) -> Self {
        Self {
            tick,
            error: None,
            theme,
        }
    }

    #[must_use]
    pub const fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Spinner glyph for a frame counter
    #[must_use]
    pub const fn frame(tick: usize) -> char {
        FRAMES[tick % FRAMES.len()]
    }
}

impl Widget for Loader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Notes ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match self.error {
            Some(error) => vec![
                Line::styled(format!("✗ {error}"), self.theme.error_style()),
                Line::styled("Press Ctrl-R to retry", self.theme.dimmed_style()),
            ],
            None => vec![Line::styled(
                format!("{} Loading notes...", Self::frame(self.tick)),
                self.theme.info_style(),
            )],
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
