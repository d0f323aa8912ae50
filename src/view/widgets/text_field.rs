//! Single-line editable text buffer
//!
//! Shared by the search box and the create-note form. The cursor is a
//! character index, never a byte index, so multi-byte input edits cleanly.

/// Editable text with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    buffer: String,
    cursor: usize,
}

impl TextField {
    /// Create a field holding `text` with the cursor at the end
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position (character index)
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Whether the field is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Replace the whole text, cursor to end
    pub fn set(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    /// Byte index of the cursor
    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    ///
    /// Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_idx = self.byte_index();
        let prev_byte_idx = self.buffer[..byte_idx]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.buffer.remove(prev_byte_idx);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self) -> bool {
        let byte_idx = self.byte_index();
        if byte_idx >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(byte_idx);
        true
    }

    /// Delete the word before the cursor (Ctrl+W)
    ///
    /// Returns whether anything was removed.
    pub fn delete_word_backwards(&mut self) -> bool {
        let byte_idx = self.byte_index();
        if byte_idx == 0 {
            return false;
        }
        let trimmed = self.buffer[..byte_idx].trim_end();
        let new_end = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(idx, space)| idx + space.len_utf8());

        self.buffer.drain(new_end..byte_idx);
        self.cursor = self.buffer[..new_end].chars().count();
        true
    }

    /// Clear the whole line (Ctrl+U)
    ///
    /// Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.buffer.is_empty();
        self.buffer.clear();
        self.cursor = 0;
        changed
    }

    /// Move cursor left
    pub const fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub const fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.len_chars();
    }

    /// Text visible in `width` columns and the cursor offset inside it
    ///
    /// Scrolls so the cursor stays roughly centered once the text overflows.
    #[must_use]
    pub fn window(&self, width: usize) -> (String, usize) {
        let total = self.len_chars();
        if total < width || width == 0 {
            return (self.buffer.clone(), self.cursor);
        }

        let half = width / 2;
        let start = if self.cursor <= half {
            0
        } else if self.cursor + half >= total {
            (total + 1).saturating_sub(width)
        } else {
            self.cursor - half
        };

        let visible: String = self.buffer.chars().skip(start).take(width).collect();
        (visible, self.cursor - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_input() {
        let mut field = TextField::default();
        for c in "hello".chars() {
            field.insert(c);
        }
        assert_eq!(field.text(), "hello");
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn test_cursor_movement() {
        let mut field = TextField::new("hello");

        field.cursor_left();
        assert_eq!(field.cursor(), 4);

        field.cursor_home();
        assert_eq!(field.cursor(), 0);
        field.cursor_left();
        assert_eq!(field.cursor(), 0);

        field.cursor_end();
        assert_eq!(field.cursor(), 5);

        field.cursor_right();
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut field = TextField::new("hello");

        assert!(field.backspace());
        assert_eq!(field.text(), "hell");

        field.cursor_home();
        assert!(!field.backspace());
        assert!(field.delete());
        assert_eq!(field.text(), "ell");

        field.cursor_end();
        assert!(!field.delete());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TextField::new("café");
        assert_eq!(field.cursor(), 4);
        field.backspace();
        assert_eq!(field.text(), "caf");
        field.cursor_home();
        field.insert('ü');
        assert_eq!(field.text(), "ücaf");
        assert_eq!(field.byte_index(), 'ü'.len_utf8());
    }

    #[test]
    fn test_delete_word_backwards() {
        let mut field = TextField::new("hello world");

        assert!(field.delete_word_backwards());
        assert_eq!(field.text(), "hello ");
        assert_eq!(field.cursor(), 6);

        assert!(field.delete_word_backwards());
        assert_eq!(field.text(), "");
        assert!(!field.delete_word_backwards());
    }

    #[test]
    fn test_delete_word_after_multibyte_space() {
        let mut field = TextField::new("foo\u{a0}bar");
        assert!(field.delete_word_backwards());
        assert_eq!(field.text(), "foo\u{a0}");
        assert_eq!(field.cursor(), 4);

        let mut field = TextField::new("検索\u{3000}メモ");
        assert!(field.delete_word_backwards());
        assert_eq!(field.text(), "検索\u{3000}");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_clear() {
        let mut field = TextField::new("abc");
        assert!(field.clear());
        assert!(field.is_empty());
        assert!(!field.clear());
    }

    #[test]
    fn test_window_scrolls_with_cursor() {
        let field = TextField::new("abcdefghij");
        // Cursor at the end keeps one free column for itself
        let (visible, offset) = field.window(5);
        assert_eq!(visible, "ghij");
        assert_eq!(offset, 4);

        let mut field = field;
        field.cursor_home();
        let (visible, offset) = field.window(5);
        assert_eq!(visible, "abcde");
        assert_eq!(offset, 0);

        let (visible, offset) = TextField::new("abc").window(5);
        assert_eq!(visible, "abc");
        assert_eq!(offset, 3);
    }
}
