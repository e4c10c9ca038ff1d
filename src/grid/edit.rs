//! In-place cell editing buffer

use super::model::CellPosition;

/// A confirmed single-cell change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub position: CellPosition,
    pub old_value: String,
    pub new_value: String,
}

/// State for editing a single cell
///
/// The buffer is transient: nothing reaches the blob until the edit is
/// confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditState {
    /// Position of the cell being edited
    pub position: CellPosition,
    /// Original value before editing (for cancel)
    pub original: String,
    buffer: String,
    /// Caret position in characters
    caret: usize,
}

impl CellEditState {
    /// Start editing with the cell's current text, caret at the end
    pub fn new(position: CellPosition, value: String) -> Self {
        let caret = value.chars().count();
        Self {
            position,
            buffer: value.clone(),
            original: value,
            caret,
        }
    }

    /// Start editing with the buffer replaced by a single typed character
    pub fn with_char(position: CellPosition, original: String, ch: char) -> Self {
        Self {
            position,
            original,
            buffer: ch.to_string(),
            caret: 1,
        }
    }

    /// Start editing with the buffer replaced by literal text (single-cell paste)
    pub fn with_text(position: CellPosition, original: String, text: &str) -> Self {
        let buffer = single_line(text);
        let caret = buffer.chars().count();
        Self {
            position,
            original,
            buffer,
            caret,
        }
    }

    /// Get the current buffer content
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Caret position in characters (for rendering)
    pub fn cursor_char_position(&self) -> usize {
        self.caret
    }

    /// Check if content changed from original
    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        let at = self.byte_offset(self.caret);
        self.buffer.insert(at, ch);
        self.caret += 1;
    }

    /// Insert text at the caret, dropping line breaks
    pub fn insert_text(&mut self, text: &str) {
        let text = single_line(text);
        let at = self.byte_offset(self.caret);
        self.buffer.insert_str(at, &text);
        self.caret += text.chars().count();
    }

    /// Delete character before caret (backspace)
    pub fn delete_backward(&mut self) {
        if self.caret == 0 {
            return;
        }
        let start = self.byte_offset(self.caret - 1);
        let end = self.byte_offset(self.caret);
        self.buffer.replace_range(start..end, "");
        self.caret -= 1;
    }

    /// Delete character at caret (delete)
    pub fn delete_forward(&mut self) {
        if self.caret >= self.char_len() {
            return;
        }
        let start = self.byte_offset(self.caret);
        let end = self.byte_offset(self.caret + 1);
        self.buffer.replace_range(start..end, "");
    }

    pub fn cursor_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.caret = (self.caret + 1).min(self.char_len());
    }

    pub fn cursor_home(&mut self) {
        self.caret = 0;
    }

    pub fn cursor_end(&mut self) {
        self.caret = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map_or(self.buffer.len(), |(i, _)| i)
    }
}

fn single_line(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
