//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Coordinates
//!
//! The playfield is addressed with `(x, y)` where y grows **upward**:
//!
//! - **Width**: 10 columns (x in `0..10` for the default origin-anchored board)
//! - **Height**: 20 rows (y in `0..20`, row 0 is the floor)
//! - **Spawn position**: (4, 18)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval used by the terminal host (~60 FPS) |
//! | `STEP_DELAY_MS` | 1000 | Gravity interval (one row per step) |
//! | `LOCK_DELAY_MS` | 500 | Grace period a grounded piece gets before it locks |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Kinds index the catalog
//! assert_eq!(PieceKind::ALL[PieceKind::T.index()], PieceKind::T);
//!
//! // Rotation states wrap in both directions
//! assert_eq!(Rotation::North.turn(RotationDirection::Clockwise), Rotation::East);
//! assert_eq!(Rotation::East.turn(RotationDirection::CounterClockwise), Rotation::North);
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn origin for new pieces on the default board
pub const SPAWN_POSITION: Position = (4, 18);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: one row per second
pub const STEP_DELAY_MS: u32 = 1000;

/// Lock delay once the piece cannot fall any further
pub const LOCK_DELAY_MS: u32 = 500;

/// Offset of a single mino relative to the piece origin
pub type MinoOffset = (i8, i8);

/// The four mino offsets of a piece in one rotation state
pub type PieceShape = [MinoOffset; 4];

/// Absolute board coordinate `(x, y)`
pub type Position = (i8, i8);

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked (or currently drawn) piece of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_and_spawn() {
        assert_eq!(STEP_DELAY_MS, 1000);
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(SPAWN_POSITION, (4, 18));
        assert!(SPAWN_POSITION.0 < BOARD_WIDTH as i8);
        assert!(SPAWN_POSITION.1 < BOARD_HEIGHT as i8);
    }

    #[test]
    fn rotation_index_wraps_both_ways() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.turn(RotationDirection::Clockwise);
        }
        assert_eq!(r, Rotation::North);

        assert_eq!(Rotation::North.turn(RotationDirection::CounterClockwise).index(), 1);
        assert_eq!(Rotation::North.turn(RotationDirection::Clockwise).index(), 3);
        assert_eq!(Rotation::East.turn(RotationDirection::CounterClockwise).index(), 0);
    }

    #[test]
    fn kind_index_matches_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape; the kind doubles as the tile id written into
/// the board when the piece is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Direction of a quarter turn
///
/// The sign convention follows the rotation matrix `x' = -d·y, y' = d·x`:
/// counter-clockwise is `+1`, clockwise is `-1` (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Signed step applied to the rotation state index
    pub fn sign(self) -> i8 {
        match self {
            RotationDirection::Clockwise => -1,
            RotationDirection::CounterClockwise => 1,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (index 0)
/// - **West**: One counter-clockwise quarter turn (index 1)
/// - **South**: Half turn (index 2)
/// - **East**: One clockwise quarter turn (index 3)
///
/// The index advances with [`RotationDirection::sign`] modulo 4, so turning
/// clockwise from North wraps to index 3 instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    West,
    South,
    East,
}

impl Rotation {
    /// Rotation state index in `0..4`
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::West => 1,
            Rotation::South => 2,
            Rotation::East => 3,
        }
    }

    /// Inverse of [`Rotation::index`]; any value is taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::West,
            2 => Rotation::South,
            _ => Rotation::East,
        }
    }

    /// State after one quarter turn in `direction`
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Rotation, RotationDirection};
    ///
    /// assert_eq!(Rotation::North.turn(RotationDirection::CounterClockwise), Rotation::West);
    /// assert_eq!(Rotation::West.turn(RotationDirection::CounterClockwise), Rotation::South);
    /// assert_eq!(Rotation::South.turn(RotationDirection::CounterClockwise), Rotation::East);
    /// assert_eq!(Rotation::East.turn(RotationDirection::CounterClockwise), Rotation::North);
    /// ```
    pub fn turn(self, direction: RotationDirection) -> Self {
        let next = (self.index() as i8 + direction.sign()).rem_euclid(4);
        Self::from_index(next as usize)
    }
}

/// Discrete player commands delivered by the input source
///
/// Each command maps to one call on the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop to the lowest valid position and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}
