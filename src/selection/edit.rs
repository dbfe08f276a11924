//! In-cell edit buffer

use crate::grid::CellAddress;

/// State for an in-progress cell edit
///
/// The cursor counts chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditState {
    /// Position of the cell being edited
    pub position: CellAddress,
    buffer: String,
    cursor: usize,
    /// Value before editing started (restored on cancel)
    pub original: String,
}

impl CellEditState {
    /// Edit a cell starting from its current value, cursor at the end
    pub fn new(position: CellAddress, value: String) -> Self {
        let cursor = value.chars().count();
        Self {
            position,
            buffer: value.clone(),
            cursor,
            original: value,
        }
    }

    /// Edit a cell replacing its content with a typed character
    pub fn with_char(position: CellAddress, original: String, ch: char) -> Self {
        Self {
            position,
            buffer: ch.to_string(),
            cursor: 1,
            original,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn into_buffer(self) -> String {
        self.buffer
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.buffer.remove(at);
        self.cursor -= 1;
    }

    /// Delete character at cursor (delete)
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Check if content changed from original
    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    /// Cursor position in characters (for rendering)
    pub fn cursor_char_position(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_cursor_at_end() {
        let edit = CellEditState::new(CellAddress::new(0, 0), "hello".to_string());
        assert_eq!(edit.buffer(), "hello");
        assert_eq!(edit.cursor_char_position(), 5);
        assert!(!edit.is_modified());
    }

    #[test]
    fn test_with_char_replaces_content() {
        let edit = CellEditState::with_char(CellAddress::new(1, 2), "old".to_string(), 'x');
        assert_eq!(edit.buffer(), "x");
        assert_eq!(edit.original, "old");
        assert!(edit.is_modified());
    }

    #[test]
    fn test_insert_and_delete_in_middle() {
        let mut edit = CellEditState::new(CellAddress::new(0, 0), "ac".to_string());
        edit.cursor_left();
        edit.insert_char('b');
        assert_eq!(edit.buffer(), "abc");
        assert_eq!(edit.cursor_char_position(), 2);

        edit.delete_backward();
        assert_eq!(edit.buffer(), "ac");
        edit.delete_forward();
        assert_eq!(edit.buffer(), "a");
        edit.delete_forward();
        assert_eq!(edit.buffer(), "a");
    }

    #[test]
    fn test_cursor_clamps() {
        let mut edit = CellEditState::new(CellAddress::new(0, 0), "ab".to_string());
        edit.cursor_right();
        assert_eq!(edit.cursor_char_position(), 2);
        edit.cursor_home();
        edit.cursor_left();
        assert_eq!(edit.cursor_char_position(), 0);
        edit.delete_backward();
        assert_eq!(edit.buffer(), "ab");
        edit.cursor_end();
        assert_eq!(edit.cursor_char_position(), 2);
    }

    #[test]
    fn test_multibyte_chars() {
        let mut edit = CellEditState::new(CellAddress::new(0, 0), "héllo".to_string());
        edit.cursor_home();
        edit.cursor_right();
        edit.cursor_right();
        edit.delete_backward();
        assert_eq!(edit.buffer(), "hllo");
        edit.insert_char('ü');
        assert_eq!(edit.buffer(), "hüllo");
    }
}
