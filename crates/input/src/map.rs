//! Key mapping from terminal events to player intents.

use crate::types::GameOptions;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Volume change per key press.
pub const VOLUME_STEP: i16 = 10;

/// Which key map applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Title screen and game over screen.
    Menu,
    Playing,
    Paused,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    CycleDifficulty,
    ToggleSound,
    VolumeUp,
    VolumeDown,
    ToggleTypedText,
    ToggleParticles,
    TogglePreview,
    Type(char),
    Backspace,
    ClearInput,
    TogglePause,
    /// Abandon the running game and return to the menu.
    EndGame,
    Quit,
}

impl Intent {
    /// Options after applying a menu toggle (None for non-option intents).
    pub fn apply(self, options: &GameOptions) -> Option<GameOptions> {
        let mut next = *options;
        match self {
            Intent::CycleDifficulty => next.difficulty = next.difficulty.cycle(),
            Intent::ToggleSound => next.sound_enabled = !next.sound_enabled,
            Intent::VolumeUp => next = next.with_volume_step(VOLUME_STEP),
            Intent::VolumeDown => next = next.with_volume_step(-VOLUME_STEP),
            Intent::ToggleTypedText => next.show_typed_text = !next.show_typed_text,
            Intent::ToggleParticles => next.particle_effects = !next.particle_effects,
            Intent::TogglePreview => next.word_preview = !next.word_preview,
            _ => return None,
        }
        Some(next)
    }
}

/// Map a key press to an intent for the given mode.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Intent> {
    if should_quit(key) {
        return Some(Intent::Quit);
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match mode {
        InputMode::Menu => {
            if ctrl || alt {
                return None;
            }
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Start),
                KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::CycleDifficulty),
                KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::ToggleSound),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Intent::VolumeUp),
                KeyCode::Char('-') | KeyCode::Char('_') => Some(Intent::VolumeDown),
                KeyCode::Char('t') | KeyCode::Char('T') => Some(Intent::ToggleTypedText),
                KeyCode::Char('f') | KeyCode::Char('F') => Some(Intent::ToggleParticles),
                KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::TogglePreview),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Intent::Quit),
                _ => None,
            }
        }
        InputMode::Playing => match key.code {
            KeyCode::Esc | KeyCode::Tab => Some(Intent::TogglePause),
            KeyCode::Backspace => Some(Intent::Backspace),
            KeyCode::Char('u') if ctrl => Some(Intent::ClearInput),
            KeyCode::Char(ch) if !ctrl && !alt && !ch.is_control() => Some(Intent::Type(ch)),
            _ => None,
        },
        InputMode::Paused => {
            if ctrl || alt {
                return None;
            }
            match key.code {
                KeyCode::Esc | KeyCode::Tab | KeyCode::Enter | KeyCode::Char(' ') => {
                    Some(Intent::TogglePause)
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(Intent::EndGame),
                _ => None,
            }
        }
    }
}

/// Ctrl-C quits from any mode.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
