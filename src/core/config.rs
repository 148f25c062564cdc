//! Engine configuration.
//!
//! Sessions are configured at construction time via `EngineConfig`:
//! - RNG seed for die rolls (deterministic replay)
//! - Which player moves first
//! - Whether moves wait for an external completion signal

use serde::{Deserialize, Serialize};

use super::Player;

/// How a validated move is finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCompletion {
    /// The unit keeps its logical position until the caller reports the end
    /// of the move (path animation) via `GameEngine::complete_move`. All
    /// intents are ignored in between.
    #[default]
    Deferred,
    /// The unit is relocated as soon as the move is validated.
    Immediate,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the session RNG.
    pub seed: u64,

    /// Active player at the start of a fresh game.
    pub first_player: Player,

    /// Move finalization mode.
    pub move_completion: MoveCompletion,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            first_player: Player::Grey,
            move_completion: MoveCompletion::Deferred,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the first active player.
    #[must_use]
    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    /// Set the move finalization mode.
    #[must_use]
    pub fn with_move_completion(mut self, mode: MoveCompletion) -> Self {
        self.move_completion = mode;
        self
    }
}
