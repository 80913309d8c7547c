use crate::game_state::Phase;
use crate::stats::GameStats;
use crate::types::{Difficulty, WordId};
use crate::word::{FallingWord, InputText};

/// Read-only copy of a falling word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordSnapshot {
    pub id: WordId,
    pub text: &'static str,
    pub x: f32,
    pub y: f32,
    pub being_typed: bool,
    /// Number of leading characters already typed.
    pub typed_chars: usize,
}

impl WordSnapshot {
    pub fn typed(&self) -> &'static str {
        split_at_char(self.text, self.typed_chars).0
    }

    pub fn remaining(&self) -> &'static str {
        split_at_char(self.text, self.typed_chars).1
    }
}

fn split_at_char(text: &'static str, n: usize) -> (&'static str, &'static str) {
    match text.char_indices().nth(n) {
        Some((i, _)) => text.split_at(i),
        None => (text, ""),
    }
}

impl From<&FallingWord> for WordSnapshot {
    fn from(value: &FallingWord) -> Self {
        Self {
            id: value.id,
            text: value.text,
            x: value.x,
            y: value.y,
            being_typed: value.is_being_typed(),
            typed_chars: value.typed().chars().count(),
        }
    }
}

/// Everything a renderer needs from one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub episode_id: u32,
    pub difficulty: Difficulty,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub words_typed: u32,
    pub spawn_interval_ms: u32,
    pub input: InputText,
    pub words: Vec<WordSnapshot>,
    pub stats: GameStats,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.episode_id = 0;
        self.difficulty = Difficulty::Normal;
        self.score = 0;
        self.level = 1;
        self.lives = 0;
        self.words_typed = 0;
        self.spawn_interval_ms = 0;
        self.input.clear();
        self.words.clear();
        self.stats = GameStats::default();
    }

    /// Game loop is running.
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn target(&self) -> Option<&WordSnapshot> {
        self.words.iter().find(|w| w.being_typed)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            episode_id: 0,
            difficulty: Difficulty::Normal,
            score: 0,
            level: 1,
            lives: 0,
            words_typed: 0,
            spawn_interval_ms: 0,
            input: InputText::new(),
            words: Vec::new(),
            stats: GameStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;
    use crate::types::Difficulty;

    #[test]
    fn test_snapshot_splits_typed_prefix() {
        let mut state = GameState::new(1);
        state.start(0, Difficulty::Normal);
        state.spawn_word("kubernetes", 300.0);
        state.submit_input("kube");

        let snap = state.snapshot();
        let word = snap.target().expect("target");
        assert_eq!(word.typed(), "kube");
        assert_eq!(word.remaining(), "rnetes");
        assert!(snap.playable());
    }

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let mut state = GameState::new(1);
        state.start(0, Difficulty::Normal);
        state.spawn_word("go", 100.0);
        state.spawn_word("run", 200.0);

        let mut snap = GameSnapshot::default();
        state.snapshot_into(&mut snap);
        assert_eq!(snap.words.len(), 2);

        state.submit_input("go");
        state.snapshot_into(&mut snap);
        assert_eq!(snap.words.len(), 1);
        assert_eq!(snap.words[0].text, "run");
        assert_eq!(snap.score, 20);
    }

    #[test]
    fn test_clear_resets_to_idle() {
        let mut state = GameState::new(1);
        state.start(0, Difficulty::Normal);
        let mut snap = state.snapshot();
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }
}
