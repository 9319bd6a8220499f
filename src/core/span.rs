//! Value types produced by the citation queries
//!
//! All positions are byte offsets into the document text. Values are
//! snapshots: any edit to the text invalidates previously computed spans.

use serde::Serialize;

/// A half-open byte range `[start, end)` in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` lies in `[start, end)`
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// The text covered by this span
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// A citation macro enclosing some position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroMatch {
    /// Command name without the backslash (e.g. `cite`, `textcite*`)
    pub command: String,
    /// Full macro span, from the backslash to the last closing delimiter
    pub span: Span,
}

/// A single citation key and its exact (trimmed) source span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyToken {
    pub text: String,
    pub span: Span,
}

/// All keys of one citation macro, in textual order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyList {
    /// Keys in order of appearance; duplicates are kept
    pub keys: Vec<String>,
    /// Span of the whole macro
    pub span: Span,
}
