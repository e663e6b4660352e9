//! Byte ranges into loaded source text.

use std::ops::Range;

/// A half-open byte range in a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range. A reversed range is normalized.
    pub fn new(range: Range<usize>) -> Self {
        let (start, end) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Span of the character at a 1-based `line` and byte `column`, as
    /// reported by JSON decoders. Positions past the end clamp to the end of `source`.
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>()
            .min(source.len());
        // Columns count bytes, not characters.
        let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let end = source[offset..]
            .chars()
            .next()
            .map_or(offset, |ch| offset + ch.len_utf8());
        Self::new(offset..end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}
