//! Catalog module - tetromino shape definitions and SRS wall kick tables
//!
//! Every kind has a base rotation (four mino offsets around the piece origin), a
//! rotation pivot, and an eight-row kick table. Rotation is computed, not looked up:
//! the active piece turns its current offsets about the pivot, so the catalog only
//! stores the spawn orientation.
//!
//! Reference: https://tetris.wiki/SRS (y grows upward here, as in the SRS tables)

use crate::types::{MinoOffset, PieceKind, PieceShape, Rotation, RotationDirection};

/// SRS wall kick data
///
/// Each row holds the `(dx, dy)` translations to try, in order, when a rotation
/// lands on an invalid footprint. Attempt 0 is always `(0, 0)`.
pub type KickTable = [[MinoOffset; 5]; 8];

/// Point the offsets are rotated about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pivot {
    /// Centre of the origin cell (J, L, S, T, Z)
    Cell,
    /// Corner shared by four cells, `(0.5, 0.5)` from the origin (I, O)
    HalfCell,
}

impl Pivot {
    /// Rotate one offset a quarter turn in `direction`
    ///
    /// Applies `x' = -d·y, y' = d·x`. The half-cell pivot works in doubled
    /// coordinates so the result is exact; it matches shifting by `-0.5`,
    /// rotating, and rounding up.
    #[inline]
    pub fn rotate(self, (x, y): MinoOffset, direction: RotationDirection) -> MinoOffset {
        let d = direction.sign();
        match self {
            Pivot::Cell => (-d * y, d * x),
            Pivot::HalfCell => {
                let (hx, hy) = (2 * x - 1, 2 * y - 1);
                let (rx, ry) = (-d * hy, d * hx);
                ((rx + 1) / 2, (ry + 1) / 2)
            }
        }
    }
}

/// Immutable definition of one tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrominoShape {
    pub kind: PieceKind,
    /// Offsets in rotation state 0 (spawn orientation)
    pub cells: PieceShape,
    pub pivot: Pivot,
    pub kicks: &'static KickTable,
}

impl TetrominoShape {
    /// Rotate a full set of offsets a quarter turn
    pub fn rotate_cells(&self, cells: &PieceShape, direction: RotationDirection) -> PieceShape {
        cells.map(|cell| self.pivot.rotate(cell, direction))
    }

    /// Offsets for an arbitrary rotation state, derived from the base offsets
    pub fn cells_for(&self, rotation: Rotation) -> PieceShape {
        let mut cells = self.cells;
        for _ in 0..rotation.index() {
            cells = self.rotate_cells(&cells, RotationDirection::CounterClockwise);
        }
        cells
    }

    /// Kick attempts for turning out of `from` in `direction`
    pub fn kicks(&self, from: Rotation, direction: RotationDirection) -> &'static [MinoOffset; 5] {
        &self.kicks[kick_index(from, direction)]
    }
}

/// Get the catalog entry for a piece kind
pub fn shape(kind: PieceKind) -> &'static TetrominoShape {
    &CATALOG[kind.index()]
}

/// The seven shapes, in [`PieceKind::ALL`] order
pub static CATALOG: [TetrominoShape; 7] = [
    TetrominoShape {
        kind: PieceKind::I,
        cells: [(-1, 1), (0, 1), (1, 1), (2, 1)],
        pivot: Pivot::HalfCell,
        kicks: &I_KICKS,
    },
    TetrominoShape {
        kind: PieceKind::O,
        cells: [(0, 1), (1, 1), (0, 0), (1, 0)],
        pivot: Pivot::HalfCell,
        kicks: &O_KICKS,
    },
    TetrominoShape {
        kind: PieceKind::T,
        cells: [(0, 1), (-1, 0), (0, 0), (1, 0)],
        pivot: Pivot::Cell,
        kicks: &JLSTZ_KICKS,
    },
    TetrominoShape {
        kind: PieceKind::S,
        cells: [(0, 1), (1, 1), (-1, 0), (0, 0)],
        pivot: Pivot::Cell,
        kicks: &JLSTZ_KICKS,
    },
    TetrominoShape {
        kind: PieceKind::Z,
        cells: [(-1, 1), (0, 1), (0, 0), (1, 0)],
        pivot: Pivot::Cell,
        kicks: &JLSTZ_KICKS,
    },
    TetrominoShape {
        kind: PieceKind::J,
        cells: [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        pivot: Pivot::Cell,
        kicks: &JLSTZ_KICKS,
    },
    TetrominoShape {
        kind: PieceKind::L,
        cells: [(1, 1), (-1, 0), (0, 0), (1, 0)],
        pivot: Pivot::Cell,
        kicks: &JLSTZ_KICKS,
    },
];

/// O piece never needs a kick: its footprint is unchanged by rotation
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->R (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // R->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // R->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->R (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->L (S->W, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // L->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // L->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->L (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // 0->R
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // R->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // R->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->R
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->L
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // L->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // L->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->L
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Row of the kick table for a rotation transition
fn kick_index(from: Rotation, direction: RotationDirection) -> usize {
    use RotationDirection::{Clockwise, CounterClockwise};

    match (from, direction) {
        (Rotation::North, Clockwise) => 0,        // N->E
        (Rotation::East, CounterClockwise) => 1,  // E->N
        (Rotation::East, Clockwise) => 2,         // E->S
        (Rotation::South, CounterClockwise) => 3, // S->E
        (Rotation::South, Clockwise) => 4,        // S->W
        (Rotation::West, CounterClockwise) => 5,  // W->S
        (Rotation::West, Clockwise) => 6,         // W->N
        (Rotation::North, CounterClockwise) => 7, // N->W
    }
}
