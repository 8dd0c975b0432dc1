//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`] and collects them
//! into a fixed-capacity per-tick buffer. Host-only keys (quit, restart) are
//! reported separately since the game core never sees them.

pub mod buffer;
pub mod map;

pub use blockfall_types as types;

pub use buffer::{CommandBuffer, MAX_COMMANDS_PER_TICK};
pub use map::{host_key, map_key_event, HostKey};
