//! Game session module - ties the board and the active piece together
//!
//! The session drives the spawn → input → gravity → lock → line clear → respawn
//! cycle. The host calls [`GameSession::tick`] once per frame with the elapsed
//! time and the commands received since the last frame.
//!
//! Each tick runs in a fixed order:
//!
//! 1. erase the active piece's footprint from the grid
//! 2. apply the commands in the order received
//! 3. run a gravity step if the step timer has elapsed
//! 4. draw the active piece's footprint back into the grid
//!
//! Between ticks the grid therefore shows the falling piece too, which is all a
//! renderer needs to read.

use tracing::info;

use crate::board::Board;
use crate::config::SessionConfig;
use crate::error::{ConfigError, GameOver};
use crate::piece::{LockOutcome, Piece, Step, Timing};
use crate::rng::{PieceSource, Randomizer};
use crate::types::{Command, Position, RotationDirection};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pieces locked this tick
    pub locked: u32,
    /// Rows removed this tick
    pub lines_cleared: u32,
    /// The session is over (spawn was blocked)
    pub game_over: bool,
}

/// A single game: board, active piece, and the piece source
#[derive(Debug, Clone)]
pub struct GameSession<S = Randomizer> {
    board: Board,
    source: S,
    active: Option<Piece>,
    spawn: Position,
    timing: Timing,
    started: bool,
    game_over: bool,
    lines_cleared: u32,
    pieces_locked: u32,
}

impl GameSession<Randomizer> {
    /// Create a session with the randomizer named in the config
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        let source = Randomizer::new(config.randomizer, config.seed);
        Self::with_source(config, source)
    }
}

impl<S: PieceSource> GameSession<S> {
    /// Create a session with an explicit piece source
    pub fn with_source(config: &SessionConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            board: Board::with_bounds(config.bounds()?),
            source,
            active: None,
            spawn: config.spawn,
            timing: config.timing(),
            started: false,
            game_over: false,
            lines_cleared: 0,
            pieces_locked: 0,
        })
    }

    /// Spawn the first piece
    pub fn start(&mut self) -> TickReport {
        if !self.started {
            self.started = true;
            self.spawn_next();
        }
        self.report()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Grid occupancy, including the active piece between ticks
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable grid access, for hosts that set up puzzles or tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn spawn_position(&self) -> Position {
        self.spawn
    }

    /// Total rows removed since the last reset
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Total pieces locked since the last reset
    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Wipe the board after a game over and begin again
    ///
    /// The piece source keeps its state, so a restarted game continues the same
    /// deterministic sequence.
    pub fn reset(&mut self) -> TickReport {
        info!(
            lines_cleared = self.lines_cleared,
            pieces_locked = self.pieces_locked,
            "session reset"
        );

        self.board.game_over();
        self.active = None;
        self.game_over = false;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        self.started = true;
        self.spawn_next();
        self.report()
    }

    /// Advance the session by one frame
    pub fn tick(&mut self, elapsed_ms: u32, commands: &[Command]) -> TickReport {
        let mut report = self.report();
        if !self.started || self.game_over {
            return report;
        }

        let Some(mut piece) = self.active.take() else {
            return report;
        };

        self.board.clear(piece.cells(), piece.position());

        for &command in commands {
            piece = match self.apply(piece, command) {
                Step::Falling(piece) => piece,
                Step::Locked(outcome) => match self.settle(outcome, &mut report) {
                    Some(next) => {
                        self.board.clear(next.cells(), next.position());
                        next
                    }
                    None => return report,
                },
            };
        }

        // A piece spawned by a command this tick starts its timers next tick.
        if report.locked == 0 && piece.advance(&self.board, elapsed_ms) {
            // Catch up on every interval owed; past the board height the piece
            // can only sit on the stack, and a zero delay would never run dry.
            for _ in 0..=self.board.height() {
                piece = match piece.step(&mut self.board, &mut self.source, self.spawn) {
                    Step::Falling(piece) => piece,
                    Step::Locked(outcome) => match self.settle(outcome, &mut report) {
                        Some(next) => next,
                        None => return report,
                    },
                };
                if report.locked > 0 || !piece.step_due() {
                    break;
                }
            }
        }

        self.board.commit(piece.cells(), piece.position(), piece.kind());
        self.active = Some(piece);
        report
    }

    fn apply(&mut self, mut piece: Piece, command: Command) -> Step {
        match command {
            Command::MoveLeft => {
                piece.try_move(&self.board, -1, 0);
            }
            Command::MoveRight => {
                piece.try_move(&self.board, 1, 0);
            }
            Command::SoftDrop => {
                piece.try_move(&self.board, 0, -1);
            }
            Command::RotateCw => {
                piece.rotate(&self.board, RotationDirection::Clockwise);
            }
            Command::RotateCcw => {
                piece.rotate(&self.board, RotationDirection::CounterClockwise);
            }
            Command::HardDrop => {
                return Step::Locked(piece.hard_drop(&mut self.board, &mut self.source, self.spawn));
            }
        }
        Step::Falling(piece)
    }

    /// Record a lock; returns the next piece unless the spawn was blocked
    fn settle(&mut self, outcome: LockOutcome, report: &mut TickReport) -> Option<Piece> {
        self.pieces_locked += 1;
        self.lines_cleared += outcome.lines_cleared;
        report.locked += 1;
        report.lines_cleared += outcome.lines_cleared;

        match outcome.next {
            Ok(next) => Some(next),
            Err(err) => {
                self.enter_game_over(err);
                report.game_over = true;
                None
            }
        }
    }

    fn spawn_next(&mut self) {
        match self.board.spawn_from(&mut self.source, self.spawn, self.timing) {
            Ok(piece) => self.active = Some(piece),
            Err(err) => self.enter_game_over(err),
        }
    }

    fn enter_game_over(&mut self, err: GameOver) {
        info!(
            %err,
            lines_cleared = self.lines_cleared,
            pieces_locked = self.pieces_locked,
            "game over"
        );
        self.active = None;
        self.game_over = true;
    }

    fn report(&self) -> TickReport {
        TickReport {
            game_over: self.game_over,
            ..TickReport::default()
        }
    }
}
