//! Status bar widget for displaying messages and fetch activity

use crate::output::MessageLevel;
use crate::view::state::StatusMessage;
use crate::view::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Background activity shown on the right of the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// Waiting for the debounce window to close
    Typing,
    /// A request for the current key is in flight
    Fetching,
    /// Showing the previous page while the new one loads
    Placeholder,
}

/// Status bar widget that displays the most recent message
pub struct StatusBar<'a> {
    messages: &'a [&'a StatusMessage],
    theme: &'a Theme,
    activity: Activity,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(messages: &'a [&'a StatusMessage], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            activity: Activity::Idle,
        }
    }

    #[must_use]
    pub const fn activity(mut self, activity: Activity) -> Self {
        self.activity = activity;
        self
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }

    const fn activity_label(activity: Activity) -> &'static str {
        match activity {
            Activity::Idle => "",
            Activity::Typing => "[typing]",
            Activity::Fetching => "[fetching]",
            Activity::Placeholder => "[updating]",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(80), Constraint::Percentage(20)])
            .split(inner);

        if let Some(msg) = self.messages.last() {
            let style = self.style_for_level(msg.level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(msg.level), style),
                Span::styled(msg.text.as_str(), style),
            ]);
            Paragraph::new(line).render(chunks[0], buf);
        }

        Paragraph::new(Line::styled(
            Self::activity_label(self.activity),
            self.theme.info_style(),
        ))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);
    }
}
