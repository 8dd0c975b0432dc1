//! Session configuration
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```
//! use blockfall_core::SessionConfig;
//!
//! let config = SessionConfig::default();
//! assert_eq!((config.width, config.height), (10, 20));
//! assert_eq!(config.spawn, (4, 18));
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use crate::board::{translate, Bounds};
use crate::catalog::CATALOG;
use crate::error::ConfigError;
use crate::piece::Timing;
use crate::rng::RandomizerKind;
use crate::types::{Position, BOARD_HEIGHT, BOARD_WIDTH, LOCK_DELAY_MS, SPAWN_POSITION, STEP_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: u8,
    pub height: u8,
    /// Center the board on the origin instead of anchoring it at `(0, 0)`
    pub centered: bool,
    pub spawn: Position,
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
    pub seed: u32,
    pub randomizer: RandomizerKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            centered: false,
            spawn: SPAWN_POSITION,
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            seed: 1,
            randomizer: RandomizerKind::Uniform,
        }
    }
}

impl SessionConfig {
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        if self.centered {
            Bounds::centered(self.width, self.height)
        } else {
            Bounds::origin_anchored(self.width, self.height)
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            step_delay_ms: self.step_delay_ms,
            lock_delay_ms: self.lock_delay_ms,
        }
    }

    /// Check dimensions, delays, and that every shape fits at the spawn origin
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.bounds()?;

        if self.step_delay_ms == 0 {
            return Err(ConfigError::ZeroStepDelay);
        }

        for shape in &CATALOG {
            let fits = shape.cells.iter().all(|&offset| {
                translate(self.spawn, offset).is_some_and(|pos| bounds.contains(pos))
            });
            if !fits {
                return Err(ConfigError::SpawnOutOfBounds {
                    kind: shape.kind,
                    position: self.spawn,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "seed": 42, "randomizer": "bag" }"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.randomizer, RandomizerKind::Bag);
        assert_eq!(config.width, BOARD_WIDTH);
        assert_eq!(config.spawn, SPAWN_POSITION);
    }

    #[test]
    fn test_centered_board_needs_centered_spawn() {
        let mut config = SessionConfig {
            centered: true,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutOfBounds { .. })
        ));

        config.spawn = (-1, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_step_delay() {
        let config = SessionConfig {
            step_delay_ms: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStepDelay));
    }

    #[test]
    fn test_rejects_spawn_against_wall() {
        // I spans x-1..=x+2
        let config = SessionConfig {
            spawn: (8, 18),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnOutOfBounds {
                kind: crate::types::PieceKind::I,
                position: (8, 18),
            })
        );
    }

    #[test]
    fn test_rejects_empty_board() {
        let config = SessionConfig {
            width: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Dimensions { .. })
        ));
    }
}
