//! Game state module - manages the complete game state
//!
//! Two entry points mutate the state while a game runs:
//!
//! - [`GameState::tick`] advances falling words, resolves misses, spawns new
//!   words and refreshes statistics.
//! - [`GameState::submit_input`] matches the player's buffer against the live
//!   words and resolves completed words.
//!
//! Both are no-ops unless the game is playing and not paused.

use log::{debug, info};

use crate::snapshot::{GameSnapshot, WordSnapshot};
use crate::stats::GameStats;
use crate::tuning::{
    levels_up_at, spawn_interval_ms, starting_lives, word_points, word_speed, words_per_minute,
};
use crate::types::{Difficulty, Playfield, WordId, MIN_FRAME_SECS, SPAWN_Y};
use crate::word::{eq_ignore_case, starts_with_ignore_case, truncate_input, FallingWord, InputText};
use crate::{words, SimpleRng};

/// Coarse session phase derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Result of one [`GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The loop ran (playing and not paused).
    pub advanced: bool,
    /// Words that crossed the bottom edge this tick.
    pub missed: u32,
    pub spawned: Option<WordId>,
    /// This tick ended the game.
    pub game_over: bool,
    /// The final score beat the previous high score.
    pub new_high_score: bool,
    /// Some live word is past the danger line.
    pub in_danger: bool,
}

/// Result of one [`GameState::submit_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not playing or paused; nothing changed.
    Ignored,
    /// Empty buffer; all typing markers cleared.
    Cleared,
    /// No live word starts with the buffer; markers cleared, buffer kept.
    NoMatch,
    /// A word is now the target.
    Targeted { id: WordId },
    /// A word was fully typed and removed.
    Completed {
        id: WordId,
        points: u32,
        level_up: bool,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    playing: bool,
    paused: bool,
    /// A game has been started at least once since construction.
    started: bool,
    difficulty: Difficulty,
    score: u32,
    level: u32,
    lives: u32,
    /// Live words in spawn order.
    words: Vec<FallingWord>,
    input: InputText,
    words_typed: u32,
    spawn_interval_ms: u32,
    next_word_id: u32,
    /// Monotonic game counter (increments on every start).
    episode_id: u32,
    rng: SimpleRng,
    // Wall-clock references (epoch ms).
    start_ms: u64,
    last_spawn_ms: u64,
    paused_at_ms: Option<u64>,
    // Accuracy bookkeeping.
    keystrokes: u32,
    keystroke_hits: u32,
    stats: GameStats,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_difficulty(seed, Difficulty::Normal)
    }

    pub fn with_difficulty(seed: u32, difficulty: Difficulty) -> Self {
        Self {
            playing: false,
            paused: false,
            started: false,
            difficulty,
            score: 0,
            level: 1,
            lives: starting_lives(difficulty),
            words: Vec::with_capacity(32),
            input: InputText::new(),
            words_typed: 0,
            spawn_interval_ms: spawn_interval_ms(1, difficulty),
            next_word_id: 0,
            episode_id: 0,
            rng: SimpleRng::new(seed),
            start_ms: 0,
            last_spawn_ms: 0,
            paused_at_ms: None,
            keystrokes: 0,
            keystroke_hits: 0,
            stats: GameStats::default(),
        }
    }

    /// Start (or restart) a game at wall-clock time `now_ms`.
    ///
    /// Resets everything except the high score and the RNG stream.
    pub fn start(&mut self, now_ms: u64, difficulty: Difficulty) {
        let high_score = self.stats.high_score;
        self.playing = true;
        self.paused = false;
        self.started = true;
        self.difficulty = difficulty;
        self.score = 0;
        self.level = 1;
        self.lives = starting_lives(difficulty);
        self.words.clear();
        self.input.clear();
        self.words_typed = 0;
        self.spawn_interval_ms = spawn_interval_ms(1, difficulty);
        self.next_word_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start_ms = now_ms;
        self.last_spawn_ms = now_ms;
        self.paused_at_ms = None;
        self.keystrokes = 0;
        self.keystroke_hits = 0;
        self.stats = GameStats {
            high_score,
            ..GameStats::default()
        };
        info!(
            "game {} started (difficulty={}, lives={})",
            self.episode_id, difficulty, self.lives
        );
    }

    /// Flip the pause flag. Returns the new paused state.
    ///
    /// On resume, the wall-clock references move forward by the paused
    /// duration so neither spawning nor statistics count the pause.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        if !self.playing {
            return self.paused;
        }
        if self.paused {
            if let Some(paused_at) = self.paused_at_ms.take() {
                let gap = now_ms.saturating_sub(paused_at);
                self.start_ms = self.start_ms.saturating_add(gap);
                self.last_spawn_ms = self.last_spawn_ms.saturating_add(gap);
            }
            self.paused = false;
        } else {
            self.paused_at_ms = Some(now_ms);
            self.paused = true;
        }
        debug!("paused={}", self.paused);
        self.paused
    }

    /// Abandon the running game. Returns whether the score is a new high score.
    ///
    /// Lives are kept, so the phase becomes [`Phase::Idle`] rather than
    /// [`Phase::GameOver`].
    pub fn end(&mut self, now_ms: u64) -> bool {
        if !self.playing {
            return false;
        }
        if let Some(paused_at) = self.paused_at_ms.take() {
            self.start_ms = self.start_ms.saturating_add(now_ms.saturating_sub(paused_at));
        }
        self.playing = false;
        self.paused = false;
        self.words.clear();
        self.input.clear();
        let new_high = self.record_high_score();
        self.refresh_stats(now_ms);
        info!("game {} ended: score={}", self.episode_id, self.score);
        new_high
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Ended by losing the last life.
    pub fn game_over(&self) -> bool {
        self.started && !self.playing && self.lives == 0
    }

    pub fn phase(&self) -> Phase {
        match (self.playing, self.paused) {
            (true, true) => Phase::Paused,
            (true, false) => Phase::Playing,
            (false, _) if self.game_over() => Phase::GameOver,
            (false, _) => Phase::Idle,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn words(&self) -> &[FallingWord] {
        &self.words
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn words_typed(&self) -> u32 {
        self.words_typed
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Seed the high score loaded from storage.
    pub fn set_high_score(&mut self, high_score: u32) {
        self.stats.high_score = high_score;
    }

    /// The word currently being typed, if any.
    pub fn target(&self) -> Option<&FallingWord> {
        self.words.iter().find(|w| w.is_being_typed())
    }

    /// Spawn `text` at horizontal center `x` using the current level's speed.
    pub fn spawn_word(&mut self, text: &'static str, x: f32) -> WordId {
        let id = WordId(self.next_word_id);
        self.next_word_id = self.next_word_id.wrapping_add(1);
        let speed = word_speed(self.level, self.difficulty);
        self.words.push(FallingWord::new(id, text, x, SPAWN_Y, speed));
        debug!("spawned {id} '{text}' at x={x:.0} speed={speed:.1}");
        id
    }

    fn spawn_random(&mut self, field: Playfield) -> WordId {
        let text = words::random_word(self.level, &mut self.rng);
        let margin = field.spawn_margin();
        let span = (field.width - 2.0 * margin).max(0.0);
        let x = self.rng.next_f32() * span + margin;
        self.spawn_word(text, x)
    }

    /// Main game tick.
    ///
    /// `elapsed_secs` is the monotonic time since the previous frame; it is
    /// raised to [`MIN_FRAME_SECS`] so a zero first frame never freezes the
    /// words, and otherwise applied in full so motion stays in step with the
    /// wall clock. `now_ms` is wall-clock epoch time used for spawn cadence
    /// and statistics.
    pub fn tick(&mut self, elapsed_secs: f32, now_ms: u64, field: Playfield) -> TickReport {
        let mut report = TickReport::default();
        if !self.playing || self.paused {
            return report;
        }
        report.advanced = true;

        let dt = clamp_frame_secs(elapsed_secs);
        for word in &mut self.words {
            word.advance(dt);
        }

        let before = self.words.len();
        self.words.retain(|w| w.y <= field.height);
        let missed = (before - self.words.len()) as u32;

        if missed > 0 {
            report.missed = missed;
            self.lives = self.lives.saturating_sub(missed);
            info!("missed {missed} word(s), lives={}", self.lives);

            if self.lives == 0 {
                self.words.clear();
                self.playing = false;
                self.paused = false;
                report.game_over = true;
                report.new_high_score = self.record_high_score();
                info!(
                    "game {} over: score={} level={} words={}",
                    self.episode_id, self.score, self.level, self.words_typed
                );
                self.refresh_stats(now_ms);
                return report;
            }
        }

        if now_ms.saturating_sub(self.last_spawn_ms) > self.spawn_interval_ms as u64 {
            report.spawned = Some(self.spawn_random(field));
            self.last_spawn_ms = now_ms;
        }

        let danger = field.danger_line();
        report.in_danger = self.words.iter().any(|w| w.y > danger);

        self.refresh_stats(now_ms);
        report
    }

    /// Match the player's full buffer against the live words.
    ///
    /// The first word in spawn order that case-insensitively starts with the
    /// buffer becomes the target. An exact match completes it.
    pub fn submit_input(&mut self, text: &str) -> InputOutcome {
        if !self.playing || self.paused {
            return InputOutcome::Ignored;
        }

        let input = truncate_input(text);
        let grew = input.len() > self.input.len();
        if grew {
            self.keystrokes = self.keystrokes.saturating_add(1);
        }
        self.input = input;

        if self.input.is_empty() {
            self.clear_markers();
            return InputOutcome::Cleared;
        }

        let Some(index) = self
            .words
            .iter()
            .position(|w| starts_with_ignore_case(w.text, &self.input))
        else {
            self.clear_markers();
            return InputOutcome::NoMatch;
        };

        if grew {
            self.keystroke_hits = self.keystroke_hits.saturating_add(1);
        }

        for (i, word) in self.words.iter_mut().enumerate() {
            if i == index {
                word.mark_typed(&self.input);
            } else {
                word.clear_typed();
            }
        }

        let id = self.words[index].id;
        if !eq_ignore_case(self.words[index].text, &self.input) {
            return InputOutcome::Targeted { id };
        }

        let word = self.words.remove(index);
        let points = word_points(word.text);
        self.score = self.score.saturating_add(points);
        self.words_typed = self.words_typed.saturating_add(1);
        self.input.clear();
        debug!("typed '{}' (+{points}, total={})", word.text, self.score);

        let level_up = levels_up_at(self.words_typed);
        if level_up {
            self.level += 1;
            self.spawn_interval_ms = spawn_interval_ms(self.level, self.difficulty);
            info!(
                "level {} (spawn interval {}ms)",
                self.level, self.spawn_interval_ms
            );
        }

        self.stats.total_words_typed = self.words_typed;
        InputOutcome::Completed {
            id,
            points,
            level_up,
        }
    }

    fn clear_markers(&mut self) {
        for word in &mut self.words {
            word.clear_typed();
        }
    }

    fn record_high_score(&mut self) -> bool {
        if self.score > self.stats.high_score {
            self.stats.high_score = self.score;
            true
        } else {
            false
        }
    }

    fn refresh_stats(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64 / 1000.0;
        self.stats.time_elapsed_secs = elapsed;
        self.stats.wpm = words_per_minute(self.words_typed, elapsed);
        self.stats.total_words_typed = self.words_typed;
        self.stats.accuracy = accuracy_percent(self.keystroke_hits, self.keystrokes);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase();
        out.episode_id = self.episode_id;
        out.difficulty = self.difficulty;
        out.score = self.score;
        out.level = self.level;
        out.lives = self.lives;
        out.words_typed = self.words_typed;
        out.spawn_interval_ms = self.spawn_interval_ms;
        out.input = self.input;
        out.words.clear();
        out.words.extend(self.words.iter().map(WordSnapshot::from));
        out.stats = self.stats;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Raise a frame delta to at least `MIN_FRAME_SECS`. Non-finite deltas
/// become the floor.
pub fn clamp_frame_secs(elapsed_secs: f32) -> f32 {
    if !elapsed_secs.is_finite() {
        return MIN_FRAME_SECS;
    }
    elapsed_secs.max(MIN_FRAME_SECS)
}

fn accuracy_percent(hits: u32, keystrokes: u32) -> u32 {
    if keystrokes == 0 {
        return 100;
    }
    ((hits as u64 * 100 + keystrokes as u64 / 2) / keystrokes as u64) as u32
}
