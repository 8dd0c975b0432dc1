//! Session tests - the tick loop as a host drives it

use blockfall::core::{Cycle, GameSession, RandomizerKind, SessionConfig, TickReport};
use blockfall::types::{Command, PieceKind};

fn session(kinds: Vec<PieceKind>) -> GameSession<Cycle> {
    let mut s = GameSession::with_source(&SessionConfig::default(), Cycle::new(kinds)).unwrap();
    s.start();
    s
}

#[test]
fn test_o_piece_spawns_and_hard_drops_to_floor() {
    let mut s = session(vec![PieceKind::O, PieceKind::T]);
    let o = *s.active().unwrap();
    assert_eq!(o.position(), (4, 18));

    let report = s.tick(16, &[Command::HardDrop]);
    assert_eq!(
        report,
        TickReport {
            locked: 1,
            lines_cleared: 0,
            game_over: false,
        }
    );
    for pos in [(4, 0), (5, 0), (4, 1), (5, 1)] {
        assert_eq!(s.board().get(pos), Some(Some(PieceKind::O)));
    }
    assert_eq!(s.active().unwrap().kind(), PieceKind::T);
    assert_eq!(s.active().unwrap().position(), (4, 18));
}

#[test]
fn test_vertical_i_clears_bottom_row() {
    let mut s = session(vec![PieceKind::I, PieceKind::O]);
    for x in 0..9 {
        s.board_mut().set((x, 0), Some(PieceKind::L));
    }

    let mut commands = vec![Command::RotateCw];
    commands.extend(std::iter::repeat(Command::MoveRight).take(6));
    commands.push(Command::HardDrop);

    let report = s.tick(16, &commands);
    assert_eq!(report.locked, 1);
    assert_eq!(report.lines_cleared, 1);
    assert_eq!(s.lines_cleared(), 1);

    // The L row is gone; only the I remnant and the new O remain.
    assert_eq!(s.board().filled_count(), 3 + 4);
    let next = *s.active().unwrap();
    assert_eq!(next.kind(), PieceKind::O);
    assert_eq!(next.position(), s.spawn_position());
}

#[test]
fn test_piece_falls_to_floor_and_locks_by_gravity() {
    let config = SessionConfig {
        step_delay_ms: 10,
        lock_delay_ms: 20,
        ..SessionConfig::default()
    };
    let mut s =
        GameSession::with_source(&config, Cycle::new(vec![PieceKind::O, PieceKind::S])).unwrap();
    s.start();

    let mut locked = 0;
    for _ in 0..40 {
        locked += s.tick(10, &[]).locked;
        if locked > 0 {
            break;
        }
    }
    assert_eq!(locked, 1);
    assert_eq!(s.pieces_locked(), 1);
    assert_eq!(s.board().get((4, 0)), Some(Some(PieceKind::O)));
    assert_eq!(s.active().unwrap().kind(), PieceKind::S);
}

#[test]
fn test_sliding_postpones_lock() {
    let config = SessionConfig {
        step_delay_ms: 10,
        lock_delay_ms: 30,
        ..SessionConfig::default()
    };
    let mut s = GameSession::with_source(&config, Cycle::new(vec![PieceKind::O])).unwrap();
    s.start();
    s.tick(0, &[Command::HardDrop]);
    // Second O resting on the first
    for _ in 0..16 {
        s.tick(0, &[Command::SoftDrop]);
    }
    assert_eq!(s.active().unwrap().position(), (4, 2));

    // Alternate left/right each tick: the lock timer never reaches 30ms.
    for i in 0..20 {
        let command = if i % 2 == 0 {
            Command::MoveLeft
        } else {
            Command::MoveRight
        };
        let report = s.tick(10, &[command]);
        assert_eq!(report.locked, 0);
    }
    assert_eq!(s.pieces_locked(), 1);
}

#[test]
fn test_game_over_is_terminal_until_reset() {
    let mut s = session(vec![PieceKind::O]);
    for x in 1..10 {
        s.board_mut().set((x, 17), Some(PieceKind::Z));
    }

    let report = s.tick(16, &[Command::HardDrop]);
    assert!(report.game_over);
    assert!(s.is_game_over());

    let frozen = s.board().clone();
    let report = s.tick(5_000, &[Command::MoveLeft, Command::HardDrop]);
    assert_eq!(report.locked, 0);
    assert_eq!(s.board(), &frozen);

    s.reset();
    assert!(!s.is_game_over());
    assert_eq!(s.board().filled_count(), 4);
    assert_eq!(s.lines_cleared(), 0);
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let config = SessionConfig {
        seed: 2024,
        randomizer: RandomizerKind::Bag,
        ..SessionConfig::default()
    };
    let mut a = GameSession::new(&config).unwrap();
    let mut b = GameSession::new(&config).unwrap();
    a.start();
    b.start();

    let script = [
        Command::MoveLeft,
        Command::RotateCw,
        Command::HardDrop,
        Command::MoveRight,
        Command::RotateCcw,
        Command::SoftDrop,
        Command::HardDrop,
    ];
    for command in script.iter().cycle().take(70) {
        let ra = a.tick(16, &[*command]);
        let rb = b.tick(16, &[*command]);
        assert_eq!(ra, rb);
        assert_eq!(a.board(), b.board());
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SessionConfig {
        spawn: (0, 0),
        ..SessionConfig::default()
    };
    assert!(GameSession::new(&config).is_err());
}
