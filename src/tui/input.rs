//! Input field handling for the terminal user interface.

/// A text input field with cursor position and active state management.
///
/// `cursor` counts characters, not bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor as (column, row) within the text, splitting on newlines.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before: String = self.value.chars().take(self.cursor).collect();
        let row = before.matches('\n').count();
        let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
        (col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte_text() {
        let mut f = InputField::with_value("héllo");
        assert_eq!(f.cursor, 5);
        f.move_cursor_left();
        f.move_cursor_left();
        f.move_cursor_left();
        f.handle_backspace();
        assert_eq!(f.value, "hllo");
        f.handle_char('é');
        assert_eq!(f.value, "héllo");
        f.handle_delete();
        assert_eq!(f.value, "hélo");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut f = InputField::new();
        f.move_cursor_left();
        f.handle_backspace();
        f.handle_delete();
        assert_eq!(f.cursor, 0);
        f.handle_char('a');
        f.move_cursor_right();
        assert_eq!(f.cursor, 1);
    }

    #[test]
    fn test_cursor_line_col() {
        let mut f = InputField::with_value("ab\ncde");
        assert_eq!(f.cursor_line_col(), (3, 1));
        f.cursor = 2;
        assert_eq!(f.cursor_line_col(), (2, 0));
        f.clear();
        assert_eq!(f.cursor_line_col(), (0, 0));
    }
}
