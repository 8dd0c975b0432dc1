//! Error types
//!
//! Gameplay itself has a single terminal signal, [`GameOver`]. Everything else a
//! player can do wrong (walking into a wall, a blocked rotation) is reported as a
//! plain `bool` / `Option` by the piece methods.

use std::fmt;

use crate::types::{PieceKind, Position};

/// The spawn footprint of the next piece is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub kind: PieceKind,
    pub position: Position,
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "game over: {} piece cannot spawn at ({}, {})",
            self.kind.as_str(),
            self.position.0,
            self.position.1
        )
    }
}

impl std::error::Error for GameOver {}

/// Rejected session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero or larger than [`crate::board::MAX_EXTENT`]
    Dimensions { width: u8, height: u8 },
    /// Bounds would not fit the signed coordinate range
    Origin { x_min: i8, y_min: i8 },
    /// Gravity interval must be non-zero
    ZeroStepDelay,
    /// Some piece's spawn footprint leaves the board
    SpawnOutOfBounds { kind: PieceKind, position: Position },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Dimensions { width, height } => {
                write!(f, "invalid board dimensions {width}x{height}")
            }
            ConfigError::Origin { x_min, y_min } => {
                write!(f, "board origin ({x_min}, {y_min}) out of range")
            }
            ConfigError::ZeroStepDelay => write!(f, "step delay must be greater than zero"),
            ConfigError::SpawnOutOfBounds { kind, position } => write!(
                f,
                "{} piece does not fit the board at spawn ({}, {})",
                kind.as_str(),
                position.0,
                position.1
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
