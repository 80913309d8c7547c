//! Persistence for scores, options and premium status.
//!
//! Storage is modelled on a browser-style key/value store: string keys mapped
//! to string values. Typed stores layer on top and never fail on bad data:
//! anything malformed is logged and replaced by a default.
//!
//! - [`kv`]: the [`KeyValueStore`] trait with file and in-memory backends
//! - [`options`]: [`GameOptions`](crate::types::GameOptions) under `typing-game-options`
//! - [`high_score`]: stringified integer under `typing-game-high-score`
//! - [`premium`]: entitlement record with optional expiry under `ottape-premium`

pub mod error;
pub mod high_score;
pub mod kv;
pub mod options;
pub mod premium;

pub use typing_rain_types as types;

pub use error::StoreError;
pub use high_score::HIGH_SCORE_KEY;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use options::OPTIONS_KEY;
pub use premium::{PremiumPlan, PremiumStatus, PREMIUM_KEY};
