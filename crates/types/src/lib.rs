//! Shared types and tuning constants.
//!
//! Everything here is plain data so it can be used by the core rules, the
//! persistence layer and the terminal view alike.
//!
//! # Units
//!
//! The playfield is measured in logical pixels. The terminal view maps one
//! column to [`CELL_PX_W`] pixels and one row to [`CELL_PX_H`] pixels, so word
//! speeds keep the same feel regardless of the terminal size.
//!
//! # Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_WORD_SPEED` | 30 px/s | Fall speed at level 1 |
//! | `WORD_SPEED_PER_LEVEL` | 15 px/s | Added per level |
//! | `BASE_SPAWN_INTERVAL_MS` | 3000 | Spawn interval at level 1 |
//! | `SPAWN_INTERVAL_STEP_MS` | 200 | Removed per level |
//! | `MIN_SPAWN_INTERVAL_MS` | 800 | Floor |
//! | `WORDS_PER_LEVEL` | 8 | Completed words per level |
//! | `POINTS_PER_CHAR` | 10 | Score per character of a completed word |
//! | `BASE_LIVES` | 3 | Lives before the difficulty bonus |
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr;
//! use typing_rain_types::{Difficulty, Playfield};
//!
//! let d = Difficulty::from_str("difficile").unwrap();
//! assert_eq!(d, Difficulty::Hard);
//! assert_eq!(d.modifiers().lives_bonus, -1);
//!
//! let field = Playfield::from_cells(80, 24);
//! assert_eq!(field.width, 640.0);
//! assert_eq!(field.height, 384.0);
//! ```

use serde::{Deserialize, Serialize};

/// Logical pixels per terminal column.
pub const CELL_PX_W: f32 = 8.0;

/// Logical pixels per terminal row.
pub const CELL_PX_H: f32 = 16.0;

/// Fall speed of a level 1 word in px/s (before the difficulty multiplier).
pub const BASE_WORD_SPEED: f32 = 30.0;

/// Fall speed added per level in px/s.
pub const WORD_SPEED_PER_LEVEL: f32 = 15.0;

/// Spawn interval at level 1 in milliseconds.
pub const BASE_SPAWN_INTERVAL_MS: u32 = 3000;

/// Spawn interval removed per level in milliseconds.
pub const SPAWN_INTERVAL_STEP_MS: u32 = 200;

/// Spawn interval floor in milliseconds.
pub const MIN_SPAWN_INTERVAL_MS: u32 = 800;

/// Completed words needed to advance one level.
pub const WORDS_PER_LEVEL: u32 = 8;

/// Score awarded per character of a completed word.
pub const POINTS_PER_CHAR: u32 = 10;

/// Lives at the start of a game before the difficulty bonus.
pub const BASE_LIVES: u32 = 3;

/// Lives never start below this, whatever the difficulty.
pub const MIN_STARTING_LIVES: u32 = 1;

/// Vertical spawn position (above the visible playfield).
pub const SPAWN_Y: f32 = -50.0;

/// Maximum horizontal spawn margin in px.
pub const SPAWN_MARGIN_PX: f32 = 100.0;

/// Fraction of the playfield height below which a word counts as "in danger".
pub const DANGER_RATIO: f32 = 0.75;

/// Smallest frame delta fed to the loop, in seconds.
pub const MIN_FRAME_SECS: f32 = 0.001;

/// Default frame period of the scheduler (~60 FPS).
pub const FRAME_MS: u32 = 16;

/// Period of the repeating danger alert.
pub const ALERT_PERIOD_MS: u64 = 1000;

/// How long the level-up banner stays on screen.
pub const LEVEL_UP_BANNER_MS: u64 = 2000;

/// Maximum number of characters kept in the typing buffer.
pub const MAX_INPUT_LEN: usize = 32;

/// Game difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "facile")]
    Easy,
    #[default]
    Normal,
    #[serde(alias = "difficile")]
    Hard,
}

/// Multipliers applied by a difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyModifiers {
    pub speed_multiplier: f32,
    pub spawn_multiplier: f32,
    pub lives_bonus: i32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn modifiers(self) -> DifficultyModifiers {
        match self {
            Difficulty::Easy => DifficultyModifiers {
                speed_multiplier: 0.7,
                spawn_multiplier: 1.3,
                lives_bonus: 1,
            },
            Difficulty::Normal => DifficultyModifiers {
                speed_multiplier: 1.0,
                spawn_multiplier: 1.0,
                lives_bonus: 0,
            },
            Difficulty::Hard => DifficultyModifiers {
                speed_multiplier: 1.4,
                spawn_multiplier: 0.7,
                lives_bonus: -1,
            },
        }
    }

    /// Next difficulty in menu order (wraps).
    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ();

    /// Parse a difficulty name (case-insensitive, legacy names accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "facile" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" | "difficile" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player options.
///
/// Missing fields in a persisted record fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameOptions {
    pub sound_volume: u8,
    pub sound_enabled: bool,
    pub difficulty: Difficulty,
    pub show_typed_text: bool,
    pub particle_effects: bool,
    pub word_preview: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            sound_volume: 70,
            sound_enabled: true,
            difficulty: Difficulty::Normal,
            show_typed_text: true,
            particle_effects: true,
            word_preview: false,
        }
    }
}

impl GameOptions {
    pub const MAX_VOLUME: u8 = 100;

    /// Clamp out-of-range values coming from storage.
    pub fn sanitized(mut self) -> Self {
        self.sound_volume = self.sound_volume.min(Self::MAX_VOLUME);
        self
    }

    /// Whether sound cues should be emitted at all.
    pub fn audible(&self) -> bool {
        self.sound_enabled && self.sound_volume > 0
    }

    pub fn with_volume_step(mut self, delta: i16) -> Self {
        let v = (self.sound_volume as i16 + delta).clamp(0, Self::MAX_VOLUME as i16);
        self.sound_volume = v as u8;
        self
    }
}

/// Playfield dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Playfield covering `cols` x `rows` terminal cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            width: cols as f32 * CELL_PX_W,
            height: rows as f32 * CELL_PX_H,
        }
    }

    /// Horizontal margin kept free on both sides when spawning.
    pub fn spawn_margin(&self) -> f32 {
        SPAWN_MARGIN_PX.min(self.width.max(0.0) / 4.0)
    }

    /// y below which a word is about to be missed.
    pub fn danger_line(&self) -> f32 {
        self.height * DANGER_RATIO
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::from_cells(80, 21)
    }
}

/// Opaque identity of a falling word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WordId(pub u32);

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("facile"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("normal"), Ok(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("Difficile"), Ok(Difficulty::Hard));
        assert!(Difficulty::from_str("insane").is_err());
    }

    #[test]
    fn test_difficulty_cycle_visits_all() {
        let mut d = Difficulty::Easy;
        for expected in [Difficulty::Normal, Difficulty::Hard, Difficulty::Easy] {
            d = d.cycle();
            assert_eq!(d, expected);
        }
    }

    #[test]
    fn test_modifiers_table() {
        let easy = Difficulty::Easy.modifiers();
        assert_eq!(easy.speed_multiplier, 0.7);
        assert_eq!(easy.spawn_multiplier, 1.3);
        assert_eq!(easy.lives_bonus, 1);

        let hard = Difficulty::Hard.modifiers();
        assert_eq!(hard.speed_multiplier, 1.4);
        assert_eq!(hard.spawn_multiplier, 0.7);
        assert_eq!(hard.lives_bonus, -1);
    }

    #[test]
    fn test_options_json_uses_camel_case() {
        let json = serde_json::to_string(&GameOptions::default()).unwrap();
        assert!(json.contains("\"soundVolume\":70"));
        assert!(json.contains("\"difficulty\":\"normal\""));
        assert!(json.contains("\"showTypedText\":true"));
    }

    #[test]
    fn test_options_partial_record_keeps_defaults() {
        let opts: GameOptions =
            serde_json::from_str(r#"{"difficulty":"difficile","soundEnabled":false}"#).unwrap();
        assert_eq!(opts.difficulty, Difficulty::Hard);
        assert!(!opts.sound_enabled);
        assert_eq!(opts.sound_volume, 70);
        assert!(opts.show_typed_text);
    }

    #[test]
    fn test_volume_step_clamps() {
        let opts = GameOptions::default();
        assert_eq!(opts.with_volume_step(50).sound_volume, 100);
        assert_eq!(opts.with_volume_step(-200).sound_volume, 0);
        assert!(!opts.with_volume_step(-200).audible());
    }

    #[test]
    fn test_spawn_margin_shrinks_on_narrow_fields() {
        assert_eq!(Playfield::new(640.0, 100.0).spawn_margin(), 100.0);
        assert_eq!(Playfield::new(200.0, 100.0).spawn_margin(), 50.0);
    }
}
