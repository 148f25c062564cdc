//! Player intents.
//!
//! An intent is raw player input, already mapped from pointer events to
//! game objects by the caller:
//! - "Unit clicked" carries the unit
//! - "Hex clicked" carries the hex coordinate
//! - "End phase" carries nothing
//!
//! The engine decides whether an intent is legal in the current state.
//! Illegal intents are ignored, never reported as errors.

use serde::{Deserialize, Serialize};

use crate::grid::HexCoord;
use crate::units::UnitId;

/// A single player intent.
///
/// ```
/// use hexwar_engine::core::Intent;
/// use hexwar_engine::grid::HexCoord;
///
/// let click = Intent::HexClicked(HexCoord::new(2, 3));
/// assert_ne!(click, Intent::EndPhase);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// The player clicked a unit.
    UnitClicked(UnitId),
    /// The player clicked a hex (empty or not).
    HexClicked(HexCoord),
    /// The player asked to end the current phase.
    EndPhase,
}
