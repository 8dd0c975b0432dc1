//! Terminal rendering for a game session.
//!
//! The core has no rendering obligation; this crate polls the session's grid
//! after each tick and draws it. Rendering happens in two steps:
//!
//! - [`BoardView`] maps a session into a [`FrameBuffer`] (pure, unit-testable)
//! - [`TerminalRenderer`] flushes a framebuffer to the real terminal

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use board_view::{BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_full_into, TerminalRenderer};
