//! Terminal input module.
//!
//! Maps `crossterm` key events into [`Intent`]s for the current
//! [`InputMode`] and keeps the bounded [`TypingBuffer`] the player types into.
//! Independent of the game rules: the runner decides what each intent does.

pub mod buffer;
pub mod map;

pub use typing_rain_types as types;

pub use buffer::TypingBuffer;
pub use map::{map_key, should_quit, InputMode, Intent, VOLUME_STEP};
