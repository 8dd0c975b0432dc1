//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the grid, the active piece, SRS
//! rotation with wall kicks, gravity and lock timing, and line clearing. It has
//! **no dependencies** on rendering, input, or I/O:
//!
//! - **Deterministic**: the same seed (or scripted piece sequence) replays the same game
//! - **Testable**: every rule is a plain method on plain data
//! - **Host-driven**: nothing runs on its own; the host calls
//!   [`GameSession::tick`] with elapsed time and commands
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven tetromino definitions and their kick tables
//! - [`board`]: fixed-size grid with validity checks, commit/clear, and line clearing
//! - [`piece`]: the falling piece: move, rotate with kicks, gravity step, lock, hard drop
//! - [`session`]: orchestrates spawn → input → gravity → lock → clear → respawn
//! - [`rng`]: seedable piece sources (uniform, 7-bag, scripted)
//! - [`config`]: session configuration with defaults and validation
//! - [`error`]: the [`GameOver`] signal and configuration errors
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SessionConfig};
//! use blockfall_types::Command;
//!
//! let mut game = GameSession::new(&SessionConfig::default()).unwrap();
//! game.start();
//!
//! game.tick(16, &[Command::MoveRight, Command::RotateCw]);
//! let report = game.tick(16, &[Command::HardDrop]);
//!
//! assert_eq!(report.locked, 1);
//! assert!(!report.game_over);
//! ```
//!
//! # Timing
//!
//! - **Gravity**: one row every `step_delay_ms` (1000ms by default)
//! - **Lock Delay**: a grounded piece locks on the first gravity step after it has
//!   rested for `lock_delay_ms` (500ms by default)
//! - Any successful move or rotation restarts both timers

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod piece;
pub mod rng;
pub mod session;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Bounds};
pub use catalog::{shape, Pivot, TetrominoShape, CATALOG};
pub use config::SessionConfig;
pub use error::{ConfigError, GameOver};
pub use piece::{Kick, LockOutcome, Piece, Step, Timing};
pub use rng::{BagSource, Cycle, PieceSource, Randomizer, RandomizerKind, SimpleRng, UniformSource};
pub use session::{GameSession, TickReport};
