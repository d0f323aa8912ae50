//! Application state for the notes view
//!
//! Holds the user-controlled inputs (query, page, tag, modal flag) and the
//! terminal-only bits around them: the debounce stage, list cursor, form and
//! status messages. Fetch state lives in the coordinator, not here.

use super::widgets::note_modal::NoteFormState;
use super::widgets::text_field::TextField;
use crate::output::MessageLevel;
use crate::query::{Debouncer, QueryKey};
use std::time::{Duration, Instant};

/// How long status messages stay visible
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level (success, error, warning, info)
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// State of the notes view
#[derive(Debug)]
pub struct NotesState {
    query: TextField,
    page: u32,
    tag: Option<String>,
    debounced: Debouncer<String>,
    modal_open: bool,
    /// Create-note form, reset whenever the modal opens or closes
    pub form: NoteFormState,
    /// Cursor position in the note list
    pub cursor: usize,
    /// First visible row of the note list
    pub scroll_offset: usize,
    /// Rows available to the note list, updated on render
    pub visible_height: usize,
    /// Status messages to display
    pub messages: Vec<StatusMessage>,
    /// Message TTL
    pub message_ttl: Duration,
    /// Leave the event loop
    pub should_exit: bool,
}

impl NotesState {
    /// Create the state from the initial inputs
    ///
    /// The initial query counts as already settled: the first cache key uses
    /// it without waiting for the debounce window.
    #[must_use]
    pub fn new(
        initial_query: impl Into<String>,
        initial_page: u32,
        initial_tag: Option<String>,
        debounce: Duration,
    ) -> Self {
        let query: String = initial_query.into();
        Self {
            query: TextField::new(query.clone()),
            page: initial_page,
            tag: initial_tag,
            debounced: Debouncer::new(query, debounce),
            modal_open: false,
            form: NoteFormState::default(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 10,
            messages: Vec::new(),
            message_ttl: MESSAGE_TTL,
            should_exit: false,
        }
    }

    /// Query as typed (not debounced)
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.text()
    }

    /// Editable query field
    #[must_use]
    pub const fn query_field(&self) -> &TextField {
        &self.query
    }

    /// Query value after the debounce stage
    #[must_use]
    pub const fn debounced_query(&self) -> &String {
        self.debounced.value()
    }

    /// Whether a debounced update is still waiting
    #[must_use]
    pub const fn is_debouncing(&self) -> bool {
        self.debounced.is_pending()
    }

    /// Time left until the pending debounce fires
    #[must_use]
    pub fn debounce_remaining(&self, now: Instant) -> Option<Duration> {
        self.debounced.remaining(now)
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[must_use]
    pub const fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Replace the query and reset the page to 1
    ///
    /// Runs for every edit, even one that leaves the text unchanged.
    pub fn set_query(&mut self, value: impl Into<String>, now: Instant) {
        self.query.set(value);
        self.query_changed(now);
    }

    /// Apply an in-place edit to the query field
    ///
    /// `edit` returns whether it changed the text; only then does the edit
    /// count as a query change.
    pub fn edit_query(&mut self, now: Instant, edit: impl FnOnce(&mut TextField) -> bool) -> bool {
        if edit(&mut self.query) {
            self.query_changed(now);
            true
        } else {
            false
        }
    }

    /// Move the query cursor without touching the text
    pub fn move_query_cursor(&mut self, movement: impl FnOnce(&mut TextField)) {
        movement(&mut self.query);
    }

    fn query_changed(&mut self, now: Instant) {
        self.page = 1;
        self.cursor = 0;
        self.scroll_offset = 0;
        self.debounced.push(self.query.text().to_string(), now);
    }

    /// Set the page, no bounds checks
    pub fn set_page(&mut self, page: u32) {
        if page != self.page {
            self.cursor = 0;
            self.scroll_offset = 0;
        }
        self.page = page;
    }

    /// Open the create-note modal with an empty form
    pub fn open_modal(&mut self) {
        if !self.modal_open {
            self.form = NoteFormState::default();
        }
        self.modal_open = true;
    }

    /// Close the modal, discarding the form
    pub fn close_modal(&mut self) {
        if self.modal_open {
            self.form = NoteFormState::default();
        }
        self.modal_open = false;
    }

    pub fn toggle_modal(&mut self) {
        if self.modal_open {
            self.close_modal();
        } else {
            self.open_modal();
        }
    }

    /// Advance the debounce stage
    ///
    /// Returns `true` when the settled query changed on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.debounced.poll(now).is_some()
    }

    /// Cache key for the current inputs
    #[must_use]
    pub fn cache_key(&self) -> QueryKey {
        QueryKey::new(self.debounced.value().clone(), self.tag.clone(), self.page)
    }

    /// Move cursor up
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down within a list of `len` notes
    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Jump to the first note
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to the last note
    pub fn cursor_end(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Keep the cursor inside a list that may have shrunk
    pub fn clamp_cursor(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text.into()));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Clean up expired messages
    pub fn cleanup_messages(&mut self) {
        self.messages.retain(|m| !m.is_expired(self.message_ttl));
    }
}
