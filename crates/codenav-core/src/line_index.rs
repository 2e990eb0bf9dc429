//! Rope-backed line/column conversions.
//!
//! Navigation surfaces consume `(line, column)` pairs while the semantic model reasons
//! in linear char offsets; this index converts between the two in O(log n).

use ropey::Rope;

/// Line index over a document's text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total char count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get line number and column (both zero-based, in chars) for a char offset.
    ///
    /// Offsets past the end clamp to the end of the document.
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line = self.rope.char_to_line(char_offset);
        let line_start = self.rope.line_to_char(line);
        (line, char_offset - line_start)
    }

    /// Get the char offset for a zero-based `(line, column)` position.
    ///
    /// Columns past the end of the line clamp to the line's last valid position; lines
    /// past the end clamp to the end of the document.
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start = self.rope.line_to_char(line);
        let line_len = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1) - line_start - 1 // -1 for newline
        } else {
            self.rope.len_chars() - line_start
        };

        line_start + column.min(line_len)
    }

    /// Text of the given line, without its trailing newline.
    pub fn get_line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }

        Some(text)
    }

    /// The complete indexed text.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }
}
