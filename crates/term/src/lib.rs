//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the view renders a snapshot into a
//! plain framebuffer, and the renderer flushes only the cells that changed.
//! No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod redraw;
pub mod renderer;

pub use typing_rain_core as core;
pub use typing_rain_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{playfield_for, GameView, Screen, Viewport};
pub use redraw::RedrawGate;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
