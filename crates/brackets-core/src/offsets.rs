//! UTF-16 offset helpers.
//!
//! Hosts built on native text views address text in UTF-16 code units, so every offset and
//! range that crosses the `brackets-core` API is expressed in those units. Internally text is
//! stored as UTF-8; this module measures it in UTF-16 units.

/// A half-open range (`start..end`) in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextRange {
    /// Range start (inclusive).
    pub start: usize,
    /// Range end (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range. `end` is raised to `start` if smaller.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Create a range from a start and a length.
    pub fn from_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    /// An empty range anchored at `offset` (a caret).
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Range length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `other` lies entirely inside this range.
    pub fn contains_range(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Shift the range right by `delta` units.
    pub fn shifted(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

/// UTF-16 measurements over UTF-8 text.
pub struct Utf16Converter;

impl Utf16Converter {
    /// Length of `text` in UTF-16 code units.
    pub fn len(text: &str) -> usize {
        text.encode_utf16().count()
    }

    /// Returns `true` if `utf16_offset` falls on a char boundary of `text` (not between the
    /// halves of a surrogate pair and not past the end).
    pub fn is_char_boundary(text: &str, utf16_offset: usize) -> bool {
        let mut units = 0usize;
        for ch in text.chars() {
            if units >= utf16_offset {
                break;
            }
            units += ch.len_utf16();
        }
        units == utf16_offset
    }
}
