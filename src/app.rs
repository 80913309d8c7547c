//! Key handling on top of a [`Session`].

use crossterm::event::KeyEvent;

use crate::core::{InputOutcome, Phase};
use crate::input::{map_key, InputMode, Intent, TypingBuffer};
use crate::session::{FrameTime, Session, SoundSink};
use crate::store::KeyValueStore;

/// Whether the runner keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A session plus the typing buffer the player edits.
pub struct App<K: KeyValueStore, S: SoundSink> {
    session: Session<K, S>,
    buffer: TypingBuffer,
}

impl<K: KeyValueStore, S: SoundSink> App<K, S> {
    pub fn new(session: Session<K, S>) -> Self {
        Self {
            session,
            buffer: TypingBuffer::new(),
        }
    }

    pub fn session(&self) -> &Session<K, S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<K, S> {
        &mut self.session
    }

    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn input_mode(&self) -> InputMode {
        match self.session.phase() {
            Phase::Playing => InputMode::Playing,
            Phase::Paused => InputMode::Paused,
            Phase::Idle | Phase::GameOver => InputMode::Menu,
        }
    }

    /// Map a key press for the current mode and apply it.
    pub fn handle_key(&mut self, key: KeyEvent, now: FrameTime) -> Flow {
        match map_key(key, self.input_mode()) {
            Some(intent) => self.apply(intent, now),
            None => Flow::Continue,
        }
    }

    pub fn apply(&mut self, intent: Intent, now: FrameTime) -> Flow {
        match intent {
            Intent::Start => {
                self.buffer.clear();
                self.session.start_game(now);
            }
            Intent::Type(ch) => {
                if self.buffer.push(ch) {
                    self.submit(now);
                }
            }
            Intent::Backspace => {
                if self.buffer.pop().is_some() {
                    self.submit(now);
                }
            }
            Intent::ClearInput => {
                self.buffer.clear();
                self.submit(now);
            }
            Intent::TogglePause => {
                self.session.toggle_pause(now);
            }
            Intent::EndGame => {
                self.session.end_game(now);
                self.buffer.clear();
            }
            Intent::Quit => {
                self.session.end_game(now);
                return Flow::Quit;
            }
            _ => {
                if let Some(options) = intent.apply(self.session.options()) {
                    self.session.update_options(options);
                }
            }
        }
        Flow::Continue
    }

    fn submit(&mut self, now: FrameTime) -> InputOutcome {
        let outcome = self.session.submit_input(self.buffer.as_str(), now);
        // Completion clears the game's copy of the buffer.
        self.buffer.sync(self.session.game().input());
        outcome
    }
}
