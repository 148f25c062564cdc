//! Domain events emitted by the engine.
//!
//! Events are the only way renderers learn about changes. They carry plain
//! data: unit snapshots are clones taken at emission time.

use serde::{Deserialize, Serialize};

use crate::core::{CombatResult, Player, SpecialPhase, TurnPhase};
use crate::grid::HexCoord;
use crate::units::{Unit, UnitId};

/// Something that happened in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A validated move. `path` runs from origin to destination inclusive.
    UnitMoving { unit: UnitId, path: Vec<HexCoord> },
    /// A unit's health or turn flags changed.
    UnitUpdated { unit: Unit },
    /// A unit left the map.
    UnitRemoved { unit: Unit },
    /// One attack resolved, after damage application.
    CombatResolved { attackers: Vec<UnitId>, defender: UnitId },
    SelectionChanged { selected: Vec<UnitId> },
    PhaseChanged { active_player: Player, phase: TurnPhase },
    CurrentSpecialPhaseUpdated { phase: Option<SpecialPhase> },
    WinnerUpdated { winner: Option<Player> },
    CombatResultUpdated { result: Option<CombatResult> },
}

/// Event discriminant, for filtered subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    UnitMoving,
    UnitUpdated,
    UnitRemoved,
    CombatResolved,
    SelectionChanged,
    PhaseChanged,
    CurrentSpecialPhaseUpdated,
    WinnerUpdated,
    CombatResultUpdated,
}

impl GameEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::UnitMoving { .. } => EventKind::UnitMoving,
            GameEvent::UnitUpdated { .. } => EventKind::UnitUpdated,
            GameEvent::UnitRemoved { .. } => EventKind::UnitRemoved,
            GameEvent::CombatResolved { .. } => EventKind::CombatResolved,
            GameEvent::SelectionChanged { .. } => EventKind::SelectionChanged,
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::CurrentSpecialPhaseUpdated { .. } => EventKind::CurrentSpecialPhaseUpdated,
            GameEvent::WinnerUpdated { .. } => EventKind::WinnerUpdated,
            GameEvent::CombatResultUpdated { .. } => EventKind::CombatResultUpdated,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::UnitMoving => "unitMoving",
            EventKind::UnitUpdated => "unitUpdated",
            EventKind::UnitRemoved => "unitRemoved",
            EventKind::CombatResolved => "combatResolved",
            EventKind::SelectionChanged => "selectionChanged",
            EventKind::PhaseChanged => "phaseChanged",
            EventKind::CurrentSpecialPhaseUpdated => "currentSpecialPhaseUpdated",
            EventKind::WinnerUpdated => "winnerUpdated",
            EventKind::CombatResultUpdated => "combatResultUpdated",
        };
        f.write_str(name)
    }
}
