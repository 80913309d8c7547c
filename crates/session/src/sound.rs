//! Sound cues and the sinks that play them.

use std::io::Write;

/// Gameplay moments that have a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A word was fully typed.
    Laser,
    /// A word reached the bottom.
    Explosion,
    LevelUp,
    /// A word is close to the bottom (repeats while it stays there).
    Alert,
    /// The game ended with a new high score.
    Celebration,
}

/// Plays cues. Injected into the session so tests and headless runs can
/// swap it out.
pub trait SoundSink {
    /// `volume` is 0..=100 and never 0 when called.
    fn play(&mut self, cue: Cue, volume: u8);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: Cue, _volume: u8) {}
}

/// Keeps every cue in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub played: Vec<Cue>,
}

impl Recorder {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl SoundSink for Recorder {
    fn play(&mut self, cue: Cue, _volume: u8) {
        self.played.push(cue);
    }
}

/// Rings the terminal bell.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue, _volume: u8) {
        // Laser fires on every word; the bell is kept for events that matter.
        if cue == Cue::Laser {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::debug!("bell failed: {err}");
        }
    }
}
