//! Core game logic - pure and testable
//!
//! This crate contains the rules of the falling-word typing game. It has
//! **no dependencies** on terminal I/O, storage or wall clocks: callers pass
//! elapsed time and epoch milliseconds in, and read snapshots out.
//!
//! # Module Structure
//!
//! - [`words`]: word lists bucketed by tier and level-based selection
//! - [`tuning`]: speed, spawn interval, score and lives formulas
//! - [`rng`]: small seeded generator for word choice and spawn position
//! - [`word`]: the falling word entity and case-insensitive matching
//! - [`game_state`]: the game loop (`tick`) and input handler (`submit_input`)
//! - [`snapshot`]: read-only copies handed to renderers
//! - [`stats`]: words typed, elapsed time, WPM, accuracy, high score
//!
//! # Example
//!
//! ```
//! use typing_rain_core::{GameState, InputOutcome};
//! use typing_rain_core::types::{Difficulty, Playfield};
//!
//! let mut game = GameState::new(12345);
//! game.start(0, Difficulty::Normal);
//!
//! let id = game.spawn_word("jeu", 200.0);
//! assert_eq!(game.submit_input("je"), InputOutcome::Targeted { id });
//! assert!(matches!(game.submit_input("jeu"), InputOutcome::Completed { points: 30, .. }));
//!
//! // One 16ms frame, 3.1s after start: the first random word spawns.
//! let report = game.tick(0.016, 3_100, Playfield::from_cells(80, 20));
//! assert!(report.spawned.is_some());
//! ```

pub mod game_state;
pub mod rng;
pub mod snapshot;
pub mod stats;
pub mod tuning;
pub mod word;
pub mod words;

pub use typing_rain_types as types;

// Re-export commonly used types for convenience
pub use game_state::{clamp_frame_secs, GameState, InputOutcome, Phase, TickReport};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, WordSnapshot};
pub use stats::GameStats;
pub use word::{FallingWord, InputText};
pub use words::{random_word, tier_for_level, words_for_level, Tier};
