//! Game session service.
//!
//! [`Session`] owns everything a running game needs besides the terminal: the
//! [`GameState`](crate::core::GameState), the persisted options and scores, the
//! frame scheduler, the danger alert timer and the sound sink. The presentation
//! layer drives it with key input and [`Session::frame`] calls, and reads it
//! back through snapshots.

pub mod clock;
pub mod config;
pub mod scheduler;
pub mod session;
pub mod sound;

pub use typing_rain_core as core;
pub use typing_rain_store as store;
pub use typing_rain_types as types;

pub use clock::FrameTime;
pub use config::{AppConfig, PremiumRequest};
pub use scheduler::{AlertTimer, FrameScheduler};
pub use session::Session;
pub use sound::{Cue, Recorder, Silent, SoundSink, TerminalBell};
