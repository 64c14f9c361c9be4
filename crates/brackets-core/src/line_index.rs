//! Cursor-to-line mapping.
//!
//! [`line_number`] is the canonical Line Locator: a pure function over a text snapshot and a
//! UTF-16 cursor offset. [`LineIndex`] keeps an editable buffer in a [`Rope`] and answers the
//! same question in O(log N); both agree on every input.
//!
//! Line numbers are 1-based. The line holding `offset` is one plus the number of `'\n'`
//! characters strictly before `offset`, so a cursor sitting right after a newline belongs to the
//! new (possibly empty) line rather than the line it just completed.

use crate::error::LineLocatorError;
use crate::offsets::{TextRange, Utf16Converter};
use ropey::Rope;

/// Compute the 1-based line number containing the UTF-16 offset `offset` in `buffer`.
///
/// Returns [`LineLocatorError::OutOfRange`] if `offset` is past the end of the buffer; use
/// [`clamp_offset`] to clamp first.
///
/// # Example
///
/// ```rust
/// use brackets_core::line_number;
///
/// assert_eq!(line_number("", 0).unwrap(), 1);
/// assert_eq!(line_number("a\nb\nc", 2).unwrap(), 2);
/// assert_eq!(line_number("a\n", 2).unwrap(), 2);
/// ```
pub fn line_number(buffer: &str, offset: usize) -> Result<usize, LineLocatorError> {
    let mut units = 0usize;
    let mut newlines = 0usize;

    for ch in buffer.chars() {
        if units >= offset {
            break;
        }
        if ch == '\n' {
            newlines += 1;
        }
        units += ch.len_utf16();
    }

    if units < offset {
        return Err(LineLocatorError::OutOfRange {
            offset,
            len: Utf16Converter::len(buffer),
        });
    }

    Ok(newlines + 1)
}

/// Clamp a UTF-16 offset into `0..=len` and snap it back onto a char boundary.
pub fn clamp_offset(buffer: &str, offset: usize) -> usize {
    let mut boundary = 0usize;
    for ch in buffer.chars() {
        let next = boundary + ch.len_utf16();
        if next > offset {
            break;
        }
        boundary = next;
    }
    boundary
}

/// Rope-backed buffer with UTF-16 addressed line queries.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build an index from LF-normalized text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total length in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    /// Number of lines (an empty buffer has one line; a trailing newline opens a new one).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// 1-based line number holding `offset`. Agrees with [`line_number`].
    pub fn line_number(&self, offset: usize) -> Result<usize, LineLocatorError> {
        let len = self.len_utf16();
        if offset > len {
            return Err(LineLocatorError::OutOfRange { offset, len });
        }
        let char_idx = self.rope.utf16_cu_to_char(offset);
        Ok(self.rope.char_to_line(char_idx) + 1)
    }

    /// Clamp `offset` into the buffer and snap it onto a char boundary.
    pub fn clamp_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.len_utf16());
        self.rope
            .char_to_utf16_cu(self.rope.utf16_cu_to_char(offset))
    }

    fn utf16_to_char(&self, offset: usize) -> usize {
        self.rope.utf16_cu_to_char(offset.min(self.len_utf16()))
    }

    /// Text of the current line from its start up to `offset`.
    pub fn line_prefix(&self, offset: usize) -> String {
        let char_idx = self.utf16_to_char(offset);
        let line_start = self.rope.line_to_char(self.rope.char_to_line(char_idx));
        self.rope.slice(line_start..char_idx).to_string()
    }

    /// Insert text at a UTF-16 offset (clamped). Returns the number of UTF-16 units inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let char_idx = self.utf16_to_char(offset);
        self.rope.insert(char_idx, text);
        Utf16Converter::len(text)
    }

    /// Delete a UTF-16 range (clamped).
    pub fn delete(&mut self, range: TextRange) {
        let start = self.utf16_to_char(range.start);
        let end = self.utf16_to_char(range.end);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replace the whole buffer.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_basic() {
        assert_eq!(line_number("", 0), Ok(1));
        assert_eq!(line_number("a\nb\nc", 0), Ok(1));
        assert_eq!(line_number("a\nb\nc", 1), Ok(1));
        assert_eq!(line_number("a\nb\nc", 2), Ok(2));
        assert_eq!(line_number("a\nb\nc", 4), Ok(3));
        assert_eq!(line_number("a\nb\nc", 5), Ok(3));
    }

    #[test]
    fn test_line_number_after_trailing_newline() {
        assert_eq!(line_number("a\n", 2), Ok(2));
        assert_eq!(line_number("a\n\n", 3), Ok(3));
        assert_eq!(line_number("\n", 1), Ok(2));
    }

    #[test]
    fn test_line_number_out_of_range() {
        assert_eq!(
            line_number("ab", 3),
            Err(LineLocatorError::OutOfRange { offset: 3, len: 2 })
        );
        assert_eq!(
            line_number("", 1),
            Err(LineLocatorError::OutOfRange { offset: 1, len: 0 })
        );
    }

    #[test]
    fn test_line_number_counts_utf16_units() {
        // "👋" is two UTF-16 units.
        let text = "👋\nx";
        assert_eq!(line_number(text, 2), Ok(1));
        assert_eq!(line_number(text, 3), Ok(2));
        assert_eq!(line_number(text, 4), Ok(2));
        assert!(line_number(text, 5).is_err());
    }

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset("abc", 10), 3);
        assert_eq!(clamp_offset("abc", 2), 2);
        // Offset 1 is inside the surrogate pair; snap back to its start.
        assert_eq!(clamp_offset("👋b", 1), 0);
        assert_eq!(clamp_offset("", 4), 0);
    }

    #[test]
    fn test_index_matches_pure_locator() {
        let text = "first\n\nthird 👋\n";
        let index = LineIndex::from_text(text);
        for offset in 0..=index.len_utf16() {
            assert_eq!(
                index.line_number(offset),
                line_number(text, offset),
                "offset {offset}"
            );
        }
        assert!(index.line_number(index.len_utf16() + 1).is_err());
    }

    #[test]
    fn test_index_edit_in_utf16_units() {
        let mut index = LineIndex::from_text("a👋b");
        assert_eq!(index.insert(3, "X"), 1);
        assert_eq!(index.text(), "a👋Xb");
        index.delete(TextRange::new(1, 3));
        assert_eq!(index.text(), "aXb");
        assert_eq!(index.line_prefix(2), "aX");
    }

    #[test]
    fn test_index_clamp_offset() {
        let index = LineIndex::from_text("👋b");
        assert_eq!(index.clamp_offset(1), 0);
        assert_eq!(index.clamp_offset(2), 2);
        assert_eq!(index.clamp_offset(42), 3);
    }
}
