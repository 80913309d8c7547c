//! Bounded typing buffer.

use arrayvec::ArrayString;

use crate::types::MAX_INPUT_LEN;

/// Text typed by the player, capped at [`MAX_INPUT_LEN`] bytes.
///
/// The game clears its own copy when a word completes, so callers
/// [`sync`](TypingBuffer::sync) back from the game after every submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingBuffer {
    text: ArrayString<MAX_INPUT_LEN>,
}

impl TypingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character. Returns false when it does not fit.
    pub fn push(&mut self, ch: char) -> bool {
        self.text.try_push(ch).is_ok()
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents with `text` (truncated at a char boundary).
    pub fn sync(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if !self.push(ch) {
                break;
            }
        }
    }
}
