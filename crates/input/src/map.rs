//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys handled by the host loop rather than the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Quit,
    Restart,
}

/// Map keyboard input to game commands.
///
/// Layout follows the classic Q/E rotate, A/D move, S drop, space hard-drop
/// scheme, with arrow and vi keys as alternatives.
pub fn map_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::SoftDrop)
        }

        // Rotation
        KeyCode::Up | KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Command::RotateCw)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(Command::RotateCcw)
        }

        KeyCode::Char(' ') => Some(Command::HardDrop),

        _ => None,
    }
}

/// Check whether a key controls the host instead of the game.
pub fn host_key(key: KeyEvent) -> Option<HostKey> {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return Some(HostKey::Quit);
    }

    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostKey::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(Command::MoveRight)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('S'))),
            Some(Command::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('e'))),
            Some(Command::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Command::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(Command::RotateCcw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('Z'))),
            Some(Command::RotateCcw)
        );
    }

    #[test]
    fn test_hard_drop_key() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::HardDrop)
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_host_keys() {
        assert_eq!(host_key(KeyEvent::from(KeyCode::Esc)), Some(HostKey::Quit));
        assert_eq!(
            host_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(HostKey::Quit)
        );
        assert_eq!(
            host_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(HostKey::Restart)
        );
        // 'q' rotates; it is not a quit key here
        assert_eq!(host_key(KeyEvent::from(KeyCode::Char('q'))), None);
        assert_eq!(host_key(KeyEvent::from(KeyCode::Char('c'))), None);
    }
}
