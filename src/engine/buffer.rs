//! Editable text buffers
//!
//! The host editor owns the document text and caret. Citation insertion
//! only needs to read the text, move the caret and insert at the caret,
//! which is what `EditBuffer` exposes.

use crate::utils::position::clamp_to_boundary;

/// A mutable document with a caret
///
/// Implementations:
/// - `TextBuffer`: in-memory `String` with a byte-offset caret
pub trait EditBuffer {
    /// The full document text
    fn text(&self) -> &str;

    /// Caret position as a byte offset
    fn caret(&self) -> usize;

    /// Move the caret
    fn set_caret(&mut self, pos: usize);

    /// Insert `s` at the caret, leaving the caret after the inserted text
    fn insert(&mut self, s: &str);

    /// Write citation keys at the caret as `key1, key2, ...`
    fn insert_keys(&mut self, keys: &[String]) {
        self.insert(&keys.join(", "));
    }
}

/// Move the caret forward to the next byte in `stops`
///
/// Returns `false` (with the caret at the end of the text) when no stop
/// byte follows the caret.
pub fn skip_until(buffer: &mut dyn EditBuffer, stops: &[u8]) -> bool {
    let caret = buffer.caret();
    let text = buffer.text();
    let (target, found) = match text.as_bytes()[caret..]
        .iter()
        .position(|b| stops.contains(b))
    {
        Some(offset) => (caret + offset, true),
        None => (text.len(), false),
    };
    buffer.set_caret(target);
    found
}

/// The last non-whitespace character before the caret
pub fn last_char_before(buffer: &dyn EditBuffer) -> Option<char> {
    buffer.text()[..buffer.caret()].trim_end().chars().next_back()
}

/// In-memory document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    caret: usize,
}

impl TextBuffer {
    /// Create a buffer; the caret is clamped into the text
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let caret = clamp_to_boundary(&text, caret);
        Self { text, caret }
    }

    /// Create a buffer with the caret at the end of the text
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        Self { text, caret }
    }

    /// Consume the buffer, returning the edited text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl EditBuffer for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, pos: usize) {
        self.caret = clamp_to_boundary(&self.text, pos);
    }

    fn insert(&mut self, s: &str) {
        log::trace!("insert {:?} at {}", s, self.caret);
        self.text.insert_str(self.caret, s);
        self.caret += s.len();
    }
}
