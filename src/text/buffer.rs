//! Text Buffer: the virtual document being "typed" into.

use std::ops::Range;

/// A single mutable string with an insertion cursor.
///
/// All offsets are character (Unicode scalar) offsets, never byte offsets.
/// The cursor always lies in `[0, len]`: movement saturates at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    /// Current text content.
    content: String,
    /// Cursor position (char offset).
    cursor: usize,
    /// Cached char count of `content`.
    len: usize,
}

impl TextBuffer {
    /// Create an empty buffer with the cursor at 0.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            len: 0,
        }
    }

    /// Create a buffer holding `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let len = text.chars().count();
        Self {
            content: text.to_string(),
            cursor: len,
            len,
        }
    }

    /// Get the current text content.
    pub fn text(&self) -> &str {
        &self.content
    }

    /// Get the cursor position.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in chars.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a character at the cursor and advance the cursor past it.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
        self.len += 1;
    }

    /// Move the cursor left, stopping at 0.
    ///
    /// Returns how far the cursor actually moved.
    pub fn move_left(&mut self, count: usize) -> usize {
        let moved = count.min(self.cursor);
        self.cursor -= moved;
        moved
    }

    /// Move the cursor right, stopping at the end of the text.
    ///
    /// Returns how far the cursor actually moved.
    pub fn move_right(&mut self, count: usize) -> usize {
        let moved = count.min(self.len - self.cursor);
        self.cursor += moved;
        moved
    }

    /// Place the cursor, clamped to `[0, len]`.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.len);
    }

    /// Replace a char range with `replacement`, leaving the cursor at the
    /// end of the inserted text.
    ///
    /// The range is clamped to the buffer.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let end = range.end.min(self.len);
        let start = range.start.min(end);
        let byte_range = self.byte_index(start)..self.byte_index(end);
        self.content.replace_range(byte_range, replacement);

        let inserted = replacement.chars().count();
        self.len = self.len - (end - start) + inserted;
        self.cursor = start + inserted;
    }

    /// Convert a char offset to a byte offset (end of text if past it).
    fn byte_index(&self, offset: usize) -> usize {
        if offset >= self.len {
            return self.content.len();
        }
        self.content
            .char_indices()
            .nth(offset)
            .map_or(self.content.len(), |(i, _)| i)
    }
}
