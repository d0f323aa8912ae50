//! Help bar widget for displaying keybind hints

use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "PgDn", "ctrl-n")
    pub key: String,
    /// Action description (e.g., "next page")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints while browsing the list
    ///
    /// Page hints only appear when there is more than one page.
    #[must_use]
    pub fn browse_hints(paginated: bool) -> Vec<KeyHint> {
        let mut hints = vec![
            KeyHint::new("type", "search"),
            KeyHint::new("↑↓", "move"),
        ];
        if paginated {
            hints.push(KeyHint::new("PgUp/PgDn", "page"));
        }
        hints.extend([
            KeyHint::new("ctrl-n", "new note"),
            KeyHint::new("ctrl-r", "refresh"),
            KeyHint::new("Esc", "quit"),
        ]);
        hints
    }

    /// Hints while the create-note modal is open
    #[must_use]
    pub fn modal_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "next field"),
            KeyHint::new("Enter", "create"),
            KeyHint::new("Esc", "cancel"),
        ]
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
