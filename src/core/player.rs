//! Player identification.
//!
//! The two sides of a scenario. Enumeration order (`Player::ALL`) is the
//! order in which win conditions are checked.

use serde::{Deserialize, Serialize};

/// One side of the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[default]
    Grey,
    Green,
}

impl Player {
    /// Both players in table order.
    pub const ALL: [Player; 2] = [Player::Grey, Player::Green];

    /// The opposing player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::Grey => Player::Green,
            Player::Green => Player::Grey,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Grey => write!(f, "grey"),
            Player::Green => write!(f, "green"),
        }
    }
}
