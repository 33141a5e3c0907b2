//! Source location tracking: half-open byte spans plus a 1-based line number.

use std::fmt;

/// A half-open byte range `[start, end)` into the source buffer, together
/// with the 1-based line the span starts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0, line: 0 };

    #[inline]
    pub const fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    /// A zero-width span at `pos` on `line`, used for end-of-file diagnostics.
    #[inline]
    pub const fn point(pos: usize, line: u32) -> Self {
        Self { start: pos, end: pos, line }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice `source` by this span's byte range.
    ///
    /// Panics if the span is out of bounds, mirroring indexing a `&str` with
    /// a bad range; callers that lexed the span from the same buffer never
    /// trigger this.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Merge two spans on the same line into the smallest span covering both.
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.start)
    }
}
