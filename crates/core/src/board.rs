//! Board module - manages the game grid
//!
//! The board is a fixed rectangle of cells, each empty or filled with a piece kind.
//! Uses a flat row-major buffer allocated once per board; nothing on the hot paths
//! allocates.
//! Coordinates: (x, y) with y growing upward. Row `y_min` is the floor.
//! The default board is origin-anchored 10x20; a centered board is also supported.

use tracing::{debug, info};

use crate::error::{ConfigError, GameOver};
use crate::piece::{Piece, Timing};
use crate::rng::PieceSource;
use crate::types::{Cell, MinoOffset, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest supported width or height
pub const MAX_EXTENT: u8 = 64;

/// Fixed playfield rectangle: `[x_min, x_max) × [y_min, y_max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    x_min: i8,
    y_min: i8,
    width: u8,
    height: u8,
}

impl Bounds {
    /// Build bounds, rejecting anything that would overflow `i8` coordinates
    pub fn new(x_min: i8, y_min: i8, width: u8, height: u8) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || width > MAX_EXTENT || height > MAX_EXTENT {
            return Err(ConfigError::Dimensions { width, height });
        }
        let origin_ok = |min: i8| (-(MAX_EXTENT as i8)..MAX_EXTENT as i8).contains(&min);
        if !origin_ok(x_min) || !origin_ok(y_min) {
            return Err(ConfigError::Origin { x_min, y_min });
        }
        Ok(Self {
            x_min,
            y_min,
            width,
            height,
        })
    }

    /// Bottom-left cell at `(0, 0)`
    pub fn origin_anchored(width: u8, height: u8) -> Result<Self, ConfigError> {
        Self::new(0, 0, width, height)
    }

    /// Board centered on the origin, e.g. 10x20 spans `[-5, 5) × [-10, 10)`
    pub fn centered(width: u8, height: u8) -> Result<Self, ConfigError> {
        let half = |n: u8| -((n / 2) as i8);
        Self::new(half(width.min(MAX_EXTENT)), half(height.min(MAX_EXTENT)), width, height)
    }

    pub fn x_min(&self) -> i8 {
        self.x_min
    }

    pub fn y_min(&self) -> i8 {
        self.y_min
    }

    /// Exclusive right edge
    pub fn x_max(&self) -> i8 {
        self.x_min + self.width as i8
    }

    /// Exclusive top edge
    pub fn y_max(&self) -> i8 {
        self.y_min + self.height as i8
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check whether a cell lies inside the rectangle
    #[inline]
    pub fn contains(&self, (x, y): Position) -> bool {
        x >= self.x_min && x < self.x_max() && y >= self.y_min && y < self.y_max()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: 0,
            y_min: 0,
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

/// Add an offset to an origin; `None` if the result leaves the `i8` range
#[inline]
pub(crate) fn translate((x, y): Position, (dx, dy): MinoOffset) -> Option<Position> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    bounds: Bounds,
    /// Flat array of cells, row-major from the floor up (`(y - y_min) * width + (x - x_min)`)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self::with_bounds(Bounds::default())
    }

    /// Create an empty board covering `bounds`
    pub fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.width as usize * bounds.height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.bounds.contains(pos) {
            return None;
        }
        let col = (pos.0 - self.bounds.x_min) as usize;
        let row = (pos.1 - self.bounds.y_min) as usize;
        Some(row * self.bounds.width as usize + col)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.bounds.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.bounds.height
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a single cell is inside the bounds and empty
    pub fn is_free(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Check whether every `origin + offset` is inside the bounds and unoccupied
    ///
    /// Used for both movement and rotation. All cells must pass; there is no
    /// partial acceptance.
    pub fn is_valid_position(&self, cells: &[MinoOffset], origin: Position) -> bool {
        cells.iter().all(|&offset| {
            translate(origin, offset).is_some_and(|pos| self.is_free(pos))
        })
    }

    /// Write `kind` into every `origin + offset`
    ///
    /// No validity check: the caller has validated the footprint already. Cells
    /// outside the bounds are skipped.
    pub fn commit(&mut self, cells: &[MinoOffset], origin: Position, kind: PieceKind) {
        for &offset in cells {
            if let Some(pos) = translate(origin, offset) {
                self.set(pos, Some(kind));
            }
        }
    }

    /// Empty every `origin + offset`
    pub fn clear(&mut self, cells: &[MinoOffset], origin: Position) {
        for &offset in cells {
            if let Some(pos) = translate(origin, offset) {
                self.set(pos, None);
            }
        }
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: i8) -> Option<&[Cell]> {
        if y < self.bounds.y_min || y >= self.bounds.y_max() {
            return None;
        }
        let width = self.bounds.width as usize;
        let start = (y - self.bounds.y_min) as usize * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove row `y` and shift every row above it down by one
    ///
    /// The top row ends up empty. Rows are copied cell by cell with `copy_within`.
    pub fn clear_line(&mut self, y: i8) {
        if self.row(y).is_none() {
            return;
        }

        let width = self.bounds.width as usize;
        let height = self.bounds.height as usize;
        let start = (y - self.bounds.y_min) as usize;

        for row in start..height - 1 {
            let src = (row + 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }

        let top = (height - 1) * width;
        for cell in &mut self.cells[top..] {
            *cell = None;
        }
    }

    /// Clear all full rows, scanning from the floor up; returns how many were removed
    ///
    /// The cursor stays on a row after clearing it, since the row shifted into its
    /// place may be full as well.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = self.bounds.y_min;

        while row < self.bounds.y_max() {
            if self.is_row_full(row) {
                self.clear_line(row);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        if cleared > 0 {
            debug!(cleared, "cleared lines");
        }
        cleared
    }

    /// Spawn a new piece in rotation state 0 at `origin`
    ///
    /// On success the piece's footprint is drawn into the grid. A blocked footprint
    /// means the stack reached the entry point: the grid is left untouched and
    /// [`GameOver`] is returned.
    pub fn spawn_piece(
        &mut self,
        kind: PieceKind,
        origin: Position,
        timing: Timing,
    ) -> Result<Piece, GameOver> {
        let piece = Piece::new(kind, origin, timing);

        if !self.is_valid_position(piece.cells(), origin) {
            info!(kind = kind.as_str(), x = origin.0, y = origin.1, "spawn blocked");
            return Err(GameOver {
                kind,
                position: origin,
            });
        }

        self.commit(piece.cells(), origin, kind);
        debug!(kind = kind.as_str(), x = origin.0, y = origin.1, "spawned piece");
        Ok(piece)
    }

    /// Spawn the next kind drawn from `source`
    pub fn spawn_from<S: PieceSource + ?Sized>(
        &mut self,
        source: &mut S,
        origin: Position,
        timing: Timing,
    ) -> Result<Piece, GameOver> {
        let kind = source.next_kind();
        self.spawn_piece(kind, origin, timing)
    }

    /// Wipe the entire grid (terminal reset after a game over)
    pub fn game_over(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Check whether no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Count filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells, floor row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new();
        assert_eq!(board.index((0, 0)), Some(0));
        assert_eq!(board.index((9, 0)), Some(9));
        assert_eq!(board.index((0, 1)), Some(10));
        assert_eq!(board.index((9, 19)), Some(199));
        assert_eq!(board.index((-1, 0)), None);
        assert_eq!(board.index((10, 0)), None);
        assert_eq!(board.index((0, 20)), None);
    }

    #[test]
    fn test_centered_bounds() {
        let bounds = Bounds::centered(10, 20).unwrap();
        assert_eq!((bounds.x_min(), bounds.x_max()), (-5, 5));
        assert_eq!((bounds.y_min(), bounds.y_max()), (-10, 10));

        let board = Board::with_bounds(bounds);
        assert_eq!(board.index((-5, -10)), Some(0));
        assert_eq!(board.index((4, 9)), Some(199));
        assert_eq!(board.index((5, 0)), None);
    }

    #[test]
    fn test_bounds_rejects_degenerate_sizes() {
        assert!(Bounds::new(0, 0, 0, 20).is_err());
        assert!(Bounds::new(0, 0, 10, MAX_EXTENT + 1).is_err());
        assert!(Bounds::new(100, 0, 10, 20).is_err());
        assert!(Bounds::new(63, 63, 64, 64).is_ok());
    }

    #[test]
    fn test_translate_overflow_is_invalid() {
        assert_eq!(translate((127, 0), (1, 0)), None);
        assert_eq!(translate((3, 4), (-1, 2)), Some((2, 6)));

        let board = Board::new();
        assert!(!board.is_valid_position(&[(1, 0)], (127, 0)));
    }

    #[test]
    fn test_clear_line_in_flat_storage() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set((x, 0), Some(PieceKind::I));
        }
        board.set((2, 1), Some(PieceKind::T));
        board.set((3, 19), Some(PieceKind::Z));

        board.clear_line(0);

        assert_eq!(board.cells[2], Some(PieceKind::T));
        assert_eq!(board.get((3, 18)), Some(Some(PieceKind::Z)));
        assert!(board.row(19).unwrap().iter().all(|c| c.is_none()));
        assert_eq!(board.filled_count(), 2);
    }
}
