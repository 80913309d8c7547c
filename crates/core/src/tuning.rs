//! Tuning module - speed, spawn cadence, scoring and lives formulas
//!
//! All functions are pure. Levels are 1-based; level 0 is treated as level 1.

use crate::types::{
    Difficulty, BASE_LIVES, BASE_SPAWN_INTERVAL_MS, BASE_WORD_SPEED, MIN_SPAWN_INTERVAL_MS,
    MIN_STARTING_LIVES, POINTS_PER_CHAR, SPAWN_INTERVAL_STEP_MS, WORDS_PER_LEVEL,
    WORD_SPEED_PER_LEVEL,
};

/// Fall speed in px/s for words spawned at `level`.
///
/// `(30 + (level - 1) * 15) * speed_multiplier`
pub fn word_speed(level: u32, difficulty: Difficulty) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (BASE_WORD_SPEED + steps * WORD_SPEED_PER_LEVEL) * difficulty.modifiers().speed_multiplier
}

/// Minimum milliseconds between spawns at `level`.
///
/// `max(800, (3000 - (level - 1) * 200) * spawn_multiplier)`
pub fn spawn_interval_ms(level: u32, difficulty: Difficulty) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(SPAWN_INTERVAL_STEP_MS);
    // Negative before the multiplier once the level is high enough; the floor wins anyway.
    let base = BASE_SPAWN_INTERVAL_MS as f32 - reduction as f32;
    let scaled = (base * difficulty.modifiers().spawn_multiplier).round();
    if scaled <= MIN_SPAWN_INTERVAL_MS as f32 {
        MIN_SPAWN_INTERVAL_MS
    } else {
        scaled as u32
    }
}

/// Score for completing `text`.
pub fn word_points(text: &str) -> u32 {
    (text.chars().count() as u32).saturating_mul(POINTS_PER_CHAR)
}

/// Lives at game start for a difficulty (never below one).
pub fn starting_lives(difficulty: Difficulty) -> u32 {
    let lives = BASE_LIVES as i32 + difficulty.modifiers().lives_bonus;
    lives.max(MIN_STARTING_LIVES as i32) as u32
}

/// Whether reaching `words_typed` completed words advances the level.
pub fn levels_up_at(words_typed: u32) -> bool {
    words_typed > 0 && words_typed % WORDS_PER_LEVEL == 0
}

/// Words per minute, rounded. Zero when no time has elapsed.
pub fn words_per_minute(words_typed: u32, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    (words_typed as f64 / elapsed_secs * 60.0).round() as u32
}
