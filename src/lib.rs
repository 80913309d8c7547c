//! Typing Rain (workspace facade crate).
//!
//! Re-exports the workspace crates as `typing_rain::{core,input,session,store,term,types}`
//! and hosts [`app`], the glue between key input and the game session.

pub mod app;

pub use typing_rain_core as core;
pub use typing_rain_input as input;
pub use typing_rain_session as session;
pub use typing_rain_store as store;
pub use typing_rain_term as term;
pub use typing_rain_types as types;
