//! Byte ranges into component source text.

use std::{fmt, ops::Range};

/// A half-open byte range `start..end` into a source string.
///
/// Spans produced by this crate are always relative to the text handed to the
/// public entry point, so they can be used directly to slice that text or to
/// point a diagnostic renderer at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
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

    /// Moves the span forward by `offset` bytes.
    pub fn shift(&self, offset: usize) -> Self {
        Self::new(self.start + offset..self.end + offset)
    }

    /// Returns the byte range covered by this span.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
