//! Pagination control
//!
//! Shows a window of page numbers around the current page. Navigation
//! targets computed here are always clamped to `1..=page_count`; the
//! controller behind it accepts any page.

use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Page numbers shown on either side of the current one
const WINDOW: u32 = 2;

/// Pagination widget for `page_count` pages
pub struct Pagination<'a> {
    page_count: u32,
    current_page: u32,
    theme: &'a Theme,
}

impl<'a> Pagination<'a> {
    #[must_use]
    pub const fn new(page_count: u32, current_page: u32, theme: &'a Theme) -> Self {
        Self {
            page_count,
            current_page,
            theme,
        }
    }

    /// Page selected by "next", never past the last page
    #[must_use]
    pub fn next_page(current: u32, page_count: u32) -> u32 {
        current.saturating_add(1).clamp(1, page_count.max(1))
    }

    /// Page selected by "previous", never before page 1
    #[must_use]
    pub fn prev_page(current: u32, page_count: u32) -> u32 {
        current.saturating_sub(1).clamp(1, page_count.max(1))
    }

    /// Page numbers to show, with `None` standing for an elided gap
    #[must_use]
    pub fn labels(page_count: u32, current: u32) -> Vec<Option<u32>> {
        let current = current.clamp(1, page_count.max(1));
        let start = current.saturating_sub(WINDOW).max(1);
        let end = (current + WINDOW).min(page_count);

        let mut labels = Vec::new();
        if start > 1 {
            labels.push(Some(1));
            if start > 2 {
                labels.push(None);
            }
        }
        labels.extend((start..=end).map(Some));
        if end < page_count {
            if end + 1 < page_count {
                labels.push(None);
            }
            labels.push(Some(page_count));
        }
        labels
    }

    /// Columns needed to render the control, borders included
    #[must_use]
    pub fn width(page_count: u32, current: u32) -> u16 {
        let labels: usize = Self::labels(page_count, current)
            .iter()
            .map(|label| label.map_or(1, |page| page.to_string().len()) + 1)
            .sum();
        let title = format!(" Page {current}/{page_count} ").len();
        // arrows and borders
        let needed = (labels + 5).max(title + 2);
        u16::try_from(needed).unwrap_or(u16::MAX)
    }
}

impl Widget for Pagination<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(format!(" Page {}/{} ", self.current_page, self.page_count));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled("‹ ", self.theme.dimmed_style())];
        for label in Self::labels(self.page_count, self.current_page) {
            match label {
                Some(page) if page == self.current_page => {
                    spans.push(Span::styled(page.to_string(), self.theme.active_page_style()));
                }
                Some(page) => spans.push(Span::raw(page.to_string())),
                None => spans.push(Span::styled("…", self.theme.dimmed_style())),
            }
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("›", self.theme.dimmed_style()));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
