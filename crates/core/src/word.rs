//! Falling word entity and case-insensitive matching helpers.

use arrayvec::ArrayString;

use crate::types::{WordId, MAX_INPUT_LEN};

/// Fixed-capacity text typed by the player.
pub type InputText = ArrayString<MAX_INPUT_LEN>;

/// A word falling down the playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingWord {
    pub id: WordId,
    pub text: &'static str,
    /// Horizontal center in px, fixed at spawn.
    pub x: f32,
    /// Vertical position in px, grows every tick.
    pub y: f32,
    /// Fall speed in px/s, fixed at spawn.
    pub speed: f32,
    typed: InputText,
    being_typed: bool,
}

impl FallingWord {
    pub fn new(id: WordId, text: &'static str, x: f32, y: f32, speed: f32) -> Self {
        Self {
            id,
            text,
            x,
            y,
            speed,
            typed: InputText::new(),
            being_typed: false,
        }
    }

    pub fn is_being_typed(&self) -> bool {
        self.being_typed
    }

    /// Prefix typed so far (empty unless being typed).
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Characters of `text` not yet typed.
    pub fn remaining(&self) -> &str {
        let typed_chars = self.typed.chars().count();
        match self.text.char_indices().nth(typed_chars) {
            Some((i, _)) => &self.text[i..],
            None => "",
        }
    }

    /// Mark as the current target. `prefix` must case-insensitively prefix `text`.
    pub(crate) fn mark_typed(&mut self, prefix: &str) {
        debug_assert!(starts_with_ignore_case(self.text, prefix));
        self.being_typed = true;
        self.typed = truncate_input(prefix);
    }

    pub(crate) fn clear_typed(&mut self) {
        self.being_typed = false;
        self.typed.clear();
    }

    pub(crate) fn advance(&mut self, dt_secs: f32) {
        self.y += self.speed * dt_secs;
    }
}

/// Case-insensitive `text.starts_with(prefix)`.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut t = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| t.next() == Some(p))
}

/// Case-insensitive string equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Copy `s` into an input buffer, dropping whole characters past capacity.
pub fn truncate_input(s: &str) -> InputText {
    let mut out = InputText::new();
    for ch in s.chars() {
        if out.try_push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_ignore_case() {
        assert!(starts_with_ignore_case("Kubernetes", "kUbE"));
        assert!(starts_with_ignore_case("jeu", ""));
        assert!(starts_with_ignore_case("jeu", "JEU"));
        assert!(!starts_with_ignore_case("jeu", "jeux"));
        assert!(!starts_with_ignore_case("jeu", "ju"));
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("React", "react"));
        assert!(!eq_ignore_case("react", "reac"));
        assert!(!eq_ignore_case("reac", "react"));
    }

    #[test]
    fn test_mark_and_clear() {
        let mut w = FallingWord::new(WordId(1), "code", 100.0, 0.0, 30.0);
        assert!(!w.is_being_typed());
        assert_eq!(w.typed(), "");

        w.mark_typed("CO");
        assert!(w.is_being_typed());
        assert_eq!(w.typed(), "CO");
        assert_eq!(w.remaining(), "de");

        w.clear_typed();
        assert!(!w.is_being_typed());
        assert_eq!(w.typed(), "");
        assert_eq!(w.remaining(), "code");
    }

    #[test]
    fn test_advance_is_linear() {
        let mut w = FallingWord::new(WordId(1), "go", 0.0, -50.0, 40.0);
        w.advance(0.5);
        assert_eq!(w.y, -30.0);
        w.advance(0.25);
        assert_eq!(w.y, -20.0);
    }

    #[test]
    fn test_truncate_input_respects_capacity() {
        let long: String = "a".repeat(MAX_INPUT_LEN + 10);
        let t = truncate_input(&long);
        assert_eq!(t.len(), MAX_INPUT_LEN);

        // Multi-byte chars are never split.
        let wide: String = "é".repeat(MAX_INPUT_LEN);
        let t = truncate_input(&wide);
        assert_eq!(t.chars().count(), MAX_INPUT_LEN / 2);
    }
}
