//! Piece module - the single falling tetromino
//!
//! A [`Piece`] owns its current offsets, origin, rotation state and two timers.
//! It never touches the grid except through the explicit [`Piece::lock`] commit;
//! every other method only asks the [`Board`] whether a candidate footprint is
//! valid.
//!
//! All methods assume the piece's own footprint is **not** drawn in the grid
//! while they run (the session erases it first), otherwise the piece would
//! collide with itself.
//!
//! # Timers
//!
//! Both timers count elapsed milliseconds:
//!
//! - the step timer accumulates every tick and triggers a gravity step once it
//!   reaches `step_delay_ms`;
//! - the lock timer accumulates only while the piece cannot move down, and the
//!   piece locks on the first gravity step that finds it grounded with the lock
//!   timer at or past `lock_delay_ms`.
//!
//! Any successful move or rotation resets both timers.

use tracing::{debug, trace};

use crate::board::{translate, Board};
use crate::catalog::{self, TetrominoShape};
use crate::error::GameOver;
use crate::rng::PieceSource;
use crate::types::{
    MinoOffset, PieceKind, PieceShape, Position, Rotation, RotationDirection, LOCK_DELAY_MS,
    STEP_DELAY_MS,
};

/// Gravity and lock delays for a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timing {
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

/// The wall kick that resolved a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kick {
    /// Position in the kick row, 0 meaning no translation was needed
    pub attempt: usize,
    pub offset: MinoOffset,
}

/// Result of committing a piece to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub kind: PieceKind,
    pub position: Position,
    pub lines_cleared: u32,
    /// The freshly spawned piece, or the game over signal
    pub next: Result<Piece, GameOver>,
}

/// Result of a gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still falling (or resting within its lock grace time)
    Falling(Piece),
    /// Locked; the piece no longer exists
    Locked(LockOutcome),
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: &'static TetrominoShape,
    cells: PieceShape,
    position: Position,
    rotation: Rotation,
    timing: Timing,
    step_elapsed_ms: u32,
    lock_elapsed_ms: u32,
}

impl Piece {
    /// Create a piece in rotation state 0 with offsets copied from the catalog
    pub fn new(kind: PieceKind, position: Position, timing: Timing) -> Self {
        let shape = catalog::shape(kind);
        Self {
            shape,
            cells: shape.cells,
            position,
            rotation: Rotation::North,
            timing,
            step_elapsed_ms: 0,
            lock_elapsed_ms: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind
    }

    pub fn shape(&self) -> &'static TetrominoShape {
        self.shape
    }

    /// Current offsets relative to the origin
    pub fn cells(&self) -> &PieceShape {
        &self.cells
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn step_elapsed_ms(&self) -> u32 {
        self.step_elapsed_ms
    }

    pub fn lock_elapsed_ms(&self) -> u32 {
        self.lock_elapsed_ms
    }

    /// Absolute board cells covered by the piece
    pub fn footprint(&self) -> [Position; 4] {
        let (x, y) = self.position;
        self.cells.map(|(dx, dy)| (x.wrapping_add(dx), y.wrapping_add(dy)))
    }

    /// Check if piece can move by the given translation
    pub fn can_move(&self, board: &Board, dx: i8, dy: i8) -> bool {
        translate(self.position, (dx, dy))
            .is_some_and(|target| board.is_valid_position(&self.cells, target))
    }

    /// Check if the piece is resting on the floor or the stack
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.can_move(board, 0, -1)
    }

    fn reset_timers(&mut self) {
        self.step_elapsed_ms = 0;
        self.lock_elapsed_ms = 0;
    }

    /// Try to translate the piece
    ///
    /// On success the origin moves and both timers restart, which is what lets a
    /// grounded piece slide to postpone its lock. On failure nothing changes.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let Some(target) = translate(self.position, (dx, dy)) else {
            return false;
        };

        if !board.is_valid_position(&self.cells, target) {
            return false;
        }

        self.position = target;
        self.reset_timers();
        true
    }

    /// Try to rotate a quarter turn, falling back to the shape's wall kicks
    ///
    /// The rotated offsets are computed fresh and only swapped in together with
    /// the kicked origin and the new rotation state. When every kick fails the
    /// piece is left exactly as it was and `None` is returned.
    pub fn rotate(&mut self, board: &Board, direction: RotationDirection) -> Option<Kick> {
        let rotated = self.shape.rotate_cells(&self.cells, direction);
        let kicks = self.shape.kicks(self.rotation, direction);

        for (attempt, &offset) in kicks.iter().enumerate() {
            let Some(target) = translate(self.position, offset) else {
                continue;
            };

            if board.is_valid_position(&rotated, target) {
                self.cells = rotated;
                self.position = target;
                self.rotation = self.rotation.turn(direction);
                self.reset_timers();

                if attempt > 0 {
                    trace!(
                        kind = self.kind().as_str(),
                        attempt,
                        dx = offset.0,
                        dy = offset.1,
                        "wall kick"
                    );
                }
                return Some(Kick { attempt, offset });
            }
        }

        None
    }

    /// Advance both timers by `elapsed_ms`; returns whether a gravity step is due
    pub fn advance(&mut self, board: &Board, elapsed_ms: u32) -> bool {
        self.step_elapsed_ms = self.step_elapsed_ms.saturating_add(elapsed_ms);
        if self.is_grounded(board) {
            self.lock_elapsed_ms = self.lock_elapsed_ms.saturating_add(elapsed_ms);
        }
        self.step_due()
    }

    /// Whether the step timer has reached the gravity interval
    pub fn step_due(&self) -> bool {
        self.step_elapsed_ms >= self.timing.step_delay_ms
    }

    /// Gravity step: move down one row, locking if grounded past the lock delay
    ///
    /// Consumes one gravity interval from the step timer; time beyond it carries
    /// over, so a long tick can owe several steps.
    pub fn step<S: PieceSource + ?Sized>(
        mut self,
        board: &mut Board,
        source: &mut S,
        spawn: Position,
    ) -> Step {
        let carry = self
            .step_elapsed_ms
            .saturating_sub(self.timing.step_delay_ms);

        let moved = self.try_move(board, 0, -1);
        self.step_elapsed_ms = carry;
        if moved {
            return Step::Falling(self);
        }

        if self.lock_elapsed_ms >= self.timing.lock_delay_ms {
            Step::Locked(self.lock(board, source, spawn))
        } else {
            Step::Falling(self)
        }
    }

    /// Drop to the lowest valid row and lock immediately
    pub fn hard_drop<S: PieceSource + ?Sized>(
        mut self,
        board: &mut Board,
        source: &mut S,
        spawn: Position,
    ) -> LockOutcome {
        while self.try_move(board, 0, -1) {}
        self.lock(board, source, spawn)
    }

    /// Bake the footprint into the board, clear full rows, and spawn the next piece
    ///
    /// This is the only place a falling piece becomes part of the stack and the
    /// only trigger for line clears.
    pub fn lock<S: PieceSource + ?Sized>(
        self,
        board: &mut Board,
        source: &mut S,
        spawn: Position,
    ) -> LockOutcome {
        let kind = self.kind();
        board.commit(&self.cells, self.position, kind);
        let lines_cleared = board.clear_lines();

        debug!(
            kind = kind.as_str(),
            x = self.position.0,
            y = self.position.1,
            lines_cleared,
            "locked piece"
        );

        LockOutcome {
            kind,
            position: self.position,
            lines_cleared,
            next: board.spawn_from(source, spawn, self.timing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Cycle;

    fn piece(kind: PieceKind, position: Position) -> Piece {
        Piece::new(kind, position, Timing::default())
    }

    #[test]
    fn test_new_piece_copies_base_offsets() {
        let p = piece(PieceKind::T, (4, 18));
        assert_eq!(p.kind(), PieceKind::T);
        assert_eq!(p.rotation(), Rotation::North);
        assert_eq!(p.cells(), &catalog::shape(PieceKind::T).cells);
        assert_eq!(p.step_elapsed_ms(), 0);
        assert_eq!(p.lock_elapsed_ms(), 0);
    }

    #[test]
    fn test_footprint_is_origin_plus_offsets() {
        let p = piece(PieceKind::O, (4, 18));
        assert_eq!(p.footprint(), [(4, 19), (5, 19), (4, 18), (5, 18)]);
    }

    #[test]
    fn test_try_move_resets_timers() {
        let board = Board::new();
        let mut p = piece(PieceKind::T, (4, 10));
        p.step_elapsed_ms = 300;
        p.lock_elapsed_ms = 200;

        assert!(p.try_move(&board, 1, 0));
        assert_eq!(p.position(), (5, 10));
        assert_eq!(p.step_elapsed_ms(), 0);
        assert_eq!(p.lock_elapsed_ms(), 0);
    }

    #[test]
    fn test_failed_move_keeps_timers() {
        let board = Board::new();
        // T at x=0 has a mino at x-1
        let mut p = piece(PieceKind::T, (1, 10));
        p.step_elapsed_ms = 300;

        assert!(!p.try_move(&board, -1, 0));
        assert_eq!(p.position(), (1, 10));
        assert_eq!(p.step_elapsed_ms(), 300);
    }

    #[test]
    fn test_rotation_without_kick_resets_timers() {
        let board = Board::new();
        let mut p = piece(PieceKind::T, (4, 10));
        p.step_elapsed_ms = 700;

        let kick = p.rotate(&board, RotationDirection::Clockwise);
        assert_eq!(kick, Some(Kick { attempt: 0, offset: (0, 0) }));
        assert_eq!(p.rotation(), Rotation::East);
        assert_eq!(p.position(), (4, 10));
        assert_eq!(p.step_elapsed_ms(), 0);
    }

    #[test]
    fn test_lock_timer_only_runs_while_grounded() {
        let board = Board::new();
        let mut airborne = piece(PieceKind::O, (4, 10));
        assert!(!airborne.advance(&board, 400));
        assert_eq!(airborne.step_elapsed_ms(), 400);
        assert_eq!(airborne.lock_elapsed_ms(), 0);

        let mut grounded = piece(PieceKind::O, (4, 0));
        assert!(!grounded.advance(&board, 400));
        assert_eq!(grounded.lock_elapsed_ms(), 400);
        assert!(grounded.advance(&board, 600));
    }

    #[test]
    fn test_step_falls_one_row() {
        let mut board = Board::new();
        let mut source = Cycle::new(vec![PieceKind::O]);
        let p = piece(PieceKind::O, (4, 10));

        match p.step(&mut board, &mut source, (4, 18)) {
            Step::Falling(p) => assert_eq!(p.position(), (4, 9)),
            Step::Locked(_) => panic!("airborne piece must not lock"),
        }
        assert!(board.is_empty());
    }

    #[test]
    fn test_step_waits_for_lock_delay() {
        let mut board = Board::new();
        let mut source = Cycle::new(vec![PieceKind::O]);
        let mut p = piece(PieceKind::O, (4, 0));
        p.lock_elapsed_ms = LOCK_DELAY_MS - 1;

        let mut p = match p.step(&mut board, &mut source, (4, 18)) {
            Step::Falling(p) => p,
            Step::Locked(_) => panic!("lock delay not yet elapsed"),
        };

        p.lock_elapsed_ms = LOCK_DELAY_MS;
        match p.step(&mut board, &mut source, (4, 18)) {
            Step::Locked(outcome) => {
                assert_eq!(outcome.position, (4, 0));
                assert_eq!(outcome.lines_cleared, 0);
                assert!(outcome.next.is_ok());
            }
            Step::Falling(_) => panic!("grounded piece past lock delay must lock"),
        }
        assert_eq!(board.get((4, 0)), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_step_carries_excess_time() {
        let mut board = Board::new();
        let mut source = Cycle::new(vec![PieceKind::O]);
        let mut p = piece(PieceKind::O, (4, 10));

        assert!(p.advance(&board, 2 * STEP_DELAY_MS + 10));
        let p = match p.step(&mut board, &mut source, (4, 18)) {
            Step::Falling(p) => p,
            Step::Locked(_) => panic!("airborne piece must not lock"),
        };
        assert_eq!(p.position(), (4, 9));
        assert_eq!(p.step_elapsed_ms(), STEP_DELAY_MS + 10);
        assert!(p.step_due());
    }
}
