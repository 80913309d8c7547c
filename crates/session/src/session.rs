//! Session service - wires the game rules to storage, timers and sound.

use std::time::Duration;

use log::{debug, info, warn};

use crate::clock::FrameTime;
use crate::config::PremiumRequest;
use crate::core::{GameSnapshot, GameState, GameStats, InputOutcome, Phase, TickReport};
use crate::scheduler::{AlertTimer, FrameScheduler};
use crate::sound::{Cue, SoundSink};
use crate::store::{high_score, options, premium, KeyValueStore, PremiumPlan, PremiumStatus};
use crate::types::{GameOptions, Playfield, ALERT_PERIOD_MS, LEVEL_UP_BANNER_MS};

/// One player's game session.
pub struct Session<K: KeyValueStore, S: SoundSink> {
    game: GameState,
    options: GameOptions,
    premium: PremiumStatus,
    store: K,
    sound: S,
    muted: bool,
    frames: FrameScheduler,
    alert: AlertTimer,
    banner_until_ms: Option<u64>,
    /// Bumped on every visible change.
    revision: u64,
}

impl<K: KeyValueStore, S: SoundSink> Session<K, S> {
    /// Load options, high score and premium status from `store`.
    pub fn new(mut store: K, sound: S, seed: u32, frame_period: Duration, now_ms: u64) -> Self {
        let opts = options::load(&store);
        let best = high_score::load(&store);
        let entitlement = premium::load(&mut store, now_ms);

        let mut game = GameState::with_difficulty(seed, opts.difficulty);
        game.set_high_score(best);
        info!(
            "session ready (high score {best}, difficulty {}, premium {})",
            opts.difficulty,
            entitlement.active_at(now_ms)
        );

        Self {
            game,
            options: opts,
            premium: entitlement,
            store,
            sound,
            muted: false,
            frames: FrameScheduler::new(frame_period),
            alert: AlertTimer::new(ALERT_PERIOD_MS),
            banner_until_ms: None,
            revision: 0,
        }
    }

    /// Silence every cue regardless of the stored options.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Start or restart a game with the current difficulty option.
    pub fn start_game(&mut self, now: FrameTime) {
        self.game.start(now.wall_ms, self.options.difficulty);
        self.frames.cancel();
        self.frames.arm(now.mono);
        self.alert.stop();
        self.banner_until_ms = None;
        self.bump();
    }

    /// Abandon a running game, saving the high score.
    pub fn end_game(&mut self, now: FrameTime) {
        if !self.game.playing() {
            return;
        }
        let new_high = self.game.end(now.wall_ms);
        self.finish(new_high);
    }

    /// Flip pause. Returns the new paused state (false when not playing).
    pub fn toggle_pause(&mut self, now: FrameTime) -> bool {
        if !self.game.playing() {
            return false;
        }
        let paused = self.game.toggle_pause(now.wall_ms);
        if paused {
            self.frames.cancel();
            self.alert.stop();
        } else {
            self.frames.arm(now.mono);
        }
        self.bump();
        paused
    }

    /// Feed the full typing buffer to the game.
    pub fn submit_input(&mut self, text: &str, now: FrameTime) -> InputOutcome {
        let outcome = self.game.submit_input(text);
        match outcome {
            InputOutcome::Ignored => return outcome,
            InputOutcome::Completed { level_up, .. } => {
                self.emit(Cue::Laser);
                if level_up {
                    self.emit(Cue::LevelUp);
                    if self.options.particle_effects {
                        self.banner_until_ms = Some(now.wall_ms + LEVEL_UP_BANNER_MS);
                    }
                }
            }
            _ => {}
        }
        self.bump();
        outcome
    }

    /// Run the pending frame if it is due.
    ///
    /// Returns `None` when no frame ran (not due, paused, idle or over).
    pub fn frame(&mut self, now: FrameTime, field: Playfield) -> Option<TickReport> {
        let dt = self.frames.poll(now.mono)?;
        let report = self.game.tick(dt, now.wall_ms, field);
        self.bump();

        if report.missed > 0 {
            self.emit(Cue::Explosion);
        }

        if report.game_over {
            self.finish(report.new_high_score);
            return Some(report);
        }

        if report.in_danger {
            self.alert.start(now.wall_ms);
        } else {
            self.alert.stop();
        }
        if self.alert.poll(now.wall_ms) {
            self.emit(Cue::Alert);
        }

        if self.game.playing() && !self.game.paused() {
            self.frames.arm(now.mono);
        }
        Some(report)
    }

    /// How long the caller may sleep before the next frame is due.
    pub fn next_wakeup(&self, now: FrameTime) -> Option<Duration> {
        self.frames.timeout(now.mono)
    }

    fn finish(&mut self, new_high: bool) {
        self.frames.cancel();
        self.alert.stop();
        self.banner_until_ms = None;

        let score = self.game.score();
        match high_score::record(&mut self.store, score) {
            Ok(saved) => debug!("high score saved={saved}"),
            Err(err) => warn!("failed to save high score {score}: {err}"),
        }
        if new_high {
            self.emit(Cue::Celebration);
        }
        self.bump();
    }

    /// Replace the options and persist them.
    pub fn update_options(&mut self, next: GameOptions) {
        let next = next.sanitized();
        if next == self.options {
            return;
        }
        self.options = next;
        if let Err(err) = options::save(&mut self.store, &self.options) {
            warn!("failed to save options: {err}");
        }
        self.bump();
    }

    /// Record a premium purchase.
    pub fn activate_premium(&mut self, plan: PremiumPlan, now_ms: u64) {
        match premium::activate(&mut self.store, plan, now_ms) {
            Ok(status) => self.premium = status,
            Err(err) => warn!("failed to save premium status: {err}"),
        }
        self.bump();
    }

    /// Remove the stored entitlement.
    pub fn deactivate_premium(&mut self) {
        if let Err(err) = premium::deactivate(&mut self.store) {
            warn!("failed to clear premium status: {err}");
        }
        self.premium = PremiumStatus::default();
        self.bump();
    }

    /// Apply a startup entitlement change.
    pub fn apply_premium_request(&mut self, request: PremiumRequest, now_ms: u64) {
        match request {
            PremiumRequest::Activate(plan) => self.activate_premium(plan, now_ms),
            PremiumRequest::Revoke => self.deactivate_premium(),
        }
    }

    pub fn premium_active(&self, now_ms: u64) -> bool {
        self.premium.active_at(now_ms)
    }

    pub fn premium(&self) -> PremiumStatus {
        self.premium
    }

    /// Level shown by the level-up banner, while it is visible.
    pub fn level_up_banner(&self, now_ms: u64) -> Option<u32> {
        match self.banner_until_ms {
            Some(until) if now_ms < until => Some(self.game.level()),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn stats(&self) -> &GameStats {
        self.game.stats()
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn frame_armed(&self) -> bool {
        self.frames.is_armed()
    }

    pub fn alert_running(&self) -> bool {
        self.alert.is_running()
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    fn emit(&mut self, cue: Cue) {
        if self.muted || !self.options.audible() {
            return;
        }
        self.sound.play(cue, self.options.sound_volume);
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Recorder;
    use crate::store::{MemoryStore, HIGH_SCORE_KEY, OPTIONS_KEY};
    use crate::types::Difficulty;
    use std::time::Instant;

    const FIELD: Playfield = Playfield::new(640.0, 320.0);
    const FRAME: Duration = Duration::from_millis(16);

    fn session_with(store: MemoryStore) -> (Session<MemoryStore, Recorder>, FrameTime) {
        let t0 = FrameTime::new(Instant::now(), 1_000_000);
        let s = Session::new(store, Recorder::default(), 7, FRAME, t0.wall_ms);
        (s, t0)
    }

    fn started() -> (Session<MemoryStore, Recorder>, FrameTime) {
        let (mut s, t0) = session_with(MemoryStore::new());
        s.start_game(t0);
        (s, t0)
    }

    #[test]
    fn test_new_loads_persisted_state() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "420").unwrap();
        store
            .set(OPTIONS_KEY, r#"{"difficulty":"hard","soundVolume":30}"#)
            .unwrap();

        let (s, _) = session_with(store);
        assert_eq!(s.stats().high_score, 420);
        assert_eq!(s.options().difficulty, Difficulty::Hard);
        assert_eq!(s.options().sound_volume, 30);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.frame_armed());
    }

    #[test]
    fn test_start_arms_first_frame() {
        let (mut s, t0) = started();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.next_wakeup(t0), Some(FRAME));

        assert!(s.frame(t0.advanced(Duration::from_millis(5)), FIELD).is_none());
        let report = s.frame(t0.advanced(FRAME), FIELD).unwrap();
        assert!(report.advanced);
        assert!(s.frame_armed());
    }

    #[test]
    fn test_completion_plays_laser_and_level_up() {
        let (mut s, t0) = started();
        for i in 0..8 {
            s.game.spawn_word("go", 100.0 + i as f32);
        }
        for _ in 0..7 {
            s.submit_input("g", t0);
            assert!(matches!(
                s.submit_input("go", t0),
                InputOutcome::Completed { level_up: false, .. }
            ));
        }
        assert!(s.level_up_banner(t0.wall_ms).is_none());
        assert!(matches!(
            s.submit_input("go", t0),
            InputOutcome::Completed { level_up: true, .. }
        ));

        assert_eq!(s.sound().count(Cue::Laser), 8);
        assert_eq!(s.sound().count(Cue::LevelUp), 1);
        assert_eq!(s.level_up_banner(t0.wall_ms + 1_999), Some(2));
        assert_eq!(s.level_up_banner(t0.wall_ms + 2_000), None);
    }

    #[test]
    fn test_banner_off_without_particles() {
        let (mut s, t0) = started();
        let opts = GameOptions {
            particle_effects: false,
            ..*s.options()
        };
        s.update_options(opts);
        for _ in 0..8 {
            s.game.spawn_word("go", 100.0);
            s.submit_input("go", t0);
        }
        assert_eq!(s.game().level(), 2);
        assert!(s.level_up_banner(t0.wall_ms).is_none());
    }

    #[test]
    fn test_muted_or_silent_options_suppress_cues() {
        let (mut s, t0) = started();
        s.update_options(GameOptions {
            sound_volume: 0,
            ..*s.options()
        });
        s.game.spawn_word("go", 100.0);
        s.submit_input("go", t0);
        assert!(s.sound().played.is_empty());

        s.update_options(GameOptions::default());
        s.set_muted(true);
        s.game.spawn_word("go", 100.0);
        s.submit_input("go", t0);
        assert!(s.sound().played.is_empty());
    }

    #[test]
    fn test_game_over_saves_high_score_and_cancels_timers() {
        let (mut s, t0) = started();
        s.game.spawn_word("jeu", 100.0);
        s.submit_input("jeu", t0);
        assert_eq!(s.game().score(), 30);

        for _ in 0..3 {
            s.game.spawn_word("bug", 100.0);
        }
        // All three cross the bottom in the same frame.
        let mut now = t0;
        let mut over = false;
        for _ in 0..200 {
            now = now.advanced(Duration::from_millis(250));
            if let Some(report) = s.frame(now, Playfield::new(640.0, 10.0)) {
                if report.game_over {
                    over = true;
                    break;
                }
            }
        }
        assert!(over);
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(!s.frame_armed());
        assert!(!s.alert_running());
        assert_eq!(s.store().get(HIGH_SCORE_KEY).as_deref(), Some("30"));
        assert_eq!(s.sound().count(Cue::Celebration), 1);
        assert!(s.sound().count(Cue::Explosion) >= 1);

        // Nothing fires after game over.
        let later = now.advanced(Duration::from_secs(10));
        assert!(s.frame(later, FIELD).is_none());
        assert!(s.next_wakeup(later).is_none());
    }

    #[test]
    fn test_danger_alert_fires_then_repeats() {
        let (mut s, t0) = started();
        s.game.spawn_word("kubernetes", 100.0);
        // Move the word just past the danger line (240 px on a 320 px field).
        let mut now = t0;
        while !s.alert_running() {
            now = now.advanced(Duration::from_millis(250));
            s.frame(now, FIELD);
        }
        assert_eq!(s.sound().count(Cue::Alert), 1);

        for _ in 0..3 {
            now = now.advanced(Duration::from_millis(250));
            s.frame(now, FIELD);
        }
        assert_eq!(s.sound().count(Cue::Alert), 1);

        // One period after the first alert.
        now = now.advanced(Duration::from_millis(250));
        s.frame(now, FIELD);
        assert!(s.alert_running());
        assert_eq!(s.sound().count(Cue::Alert), 2);
    }

    #[test]
    fn test_pause_cancels_timers_and_freezes_game() {
        let (mut s, t0) = started();
        s.game.spawn_word("code", 100.0);
        s.frame(t0.advanced(FRAME), FIELD).unwrap();

        let paused_at = t0.advanced(FRAME * 2);
        assert!(s.toggle_pause(paused_at));
        assert!(!s.frame_armed());
        assert!(!s.alert_running());
        let before = s.snapshot();

        let mut now = paused_at;
        for _ in 0..20 {
            now = now.advanced(Duration::from_millis(250));
            assert!(s.frame(now, FIELD).is_none());
            assert_eq!(s.submit_input("co", now), InputOutcome::Ignored);
        }
        assert_eq!(s.snapshot(), before);

        assert!(!s.toggle_pause(now));
        assert!(s.frame_armed());
        assert_eq!(s.next_wakeup(now), Some(FRAME));
    }

    #[test]
    fn test_end_game_keeps_best_score() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "500").unwrap();
        let (mut s, t0) = session_with(store);
        s.start_game(t0);
        s.game.spawn_word("go", 100.0);
        s.submit_input("go", t0);

        s.end_game(t0.advanced(FRAME));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.frame_armed());
        assert_eq!(s.store().get(HIGH_SCORE_KEY).as_deref(), Some("500"));
        assert_eq!(s.sound().count(Cue::Celebration), 0);
    }

    #[test]
    fn test_update_options_persists_and_bumps_revision() {
        let (mut s, _) = session_with(MemoryStore::new());
        let rev = s.revision();
        s.update_options(GameOptions {
            difficulty: Difficulty::Easy,
            ..GameOptions::default()
        });
        assert!(s.revision() > rev);
        let raw = s.store().get(OPTIONS_KEY).unwrap();
        assert!(raw.contains("\"difficulty\":\"easy\""));

        // Unchanged options are not rewritten.
        let rev = s.revision();
        s.update_options(*s.options());
        assert_eq!(s.revision(), rev);
    }

    #[test]
    fn test_start_uses_difficulty_option() {
        let (mut s, t0) = session_with(MemoryStore::new());
        s.update_options(GameOptions {
            difficulty: Difficulty::Hard,
            ..GameOptions::default()
        });
        s.start_game(t0);
        assert_eq!(s.game().lives(), 2);
        assert_eq!(s.game().difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_activate_premium() {
        let (mut s, t0) = session_with(MemoryStore::new());
        assert!(!s.premium_active(t0.wall_ms));
        s.activate_premium(PremiumPlan::Month, t0.wall_ms);
        assert!(s.premium_active(t0.wall_ms));
        assert!(s.premium().expires_at.is_some());
    }

    #[test]
    fn test_premium_requests_activate_and_revoke() {
        let (mut s, t0) = session_with(MemoryStore::new());
        s.apply_premium_request(PremiumRequest::Activate(PremiumPlan::Lifetime), t0.wall_ms);
        assert!(s.premium_active(u64::MAX));
        assert!(s.store().get(premium::PREMIUM_KEY).is_some());

        let rev = s.revision();
        s.apply_premium_request(PremiumRequest::Revoke, t0.wall_ms);
        assert!(!s.premium_active(t0.wall_ms));
        assert!(s.store().get(premium::PREMIUM_KEY).is_none());
        assert!(s.revision() > rev);
    }
}
