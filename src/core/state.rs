//! Session state machine data.
//!
//! `GameState` holds everything about a session that is not the map:
//! - Status, winner and active player
//! - Turn phase and the special-phase queue
//! - Multi-step combat bookkeeping (attackers, unassigned damage, vacated hex)
//! - Current selection and the last combat result
//!
//! Units are referenced by `UnitId`; hexes by `HexCoord`. The engine is the
//! only writer. Methods here never publish events; the engine does that
//! after calling them.

use serde::{Deserialize, Serialize};

use super::phase::{GameStatus, SpecialPhase, SpecialPhaseQueue, TurnPhase};
use super::player::Player;
use crate::grid::HexCoord;
use crate::rules::{CrtCode, CrtRow, COMBAT_RESULTS_TABLE};
use crate::units::UnitId;

/// The CRT row and die value of the most recent combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    /// Index into `COMBAT_RESULTS_TABLE`.
    pub row: usize,
    /// Die value, 1..=6.
    pub die: u8,
}

impl CombatResult {
    /// The table row this result was read from.
    #[must_use]
    pub fn crt_row(&self) -> &'static CrtRow {
        &COMBAT_RESULTS_TABLE[self.row.min(COMBAT_RESULTS_TABLE.len() - 1)]
    }

    /// The result code at (row, die).
    #[must_use]
    pub fn code(&self) -> CrtCode {
        self.crt_row().result(self.die)
    }
}

/// Process-wide mutable state of one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,

    /// Set once when a win condition is met.
    pub winner: Option<Player>,

    pub active_player: Player,

    pub current_turn_phase: TurnPhase,

    pub special_phases: SpecialPhaseQueue,

    /// Step losses the attacking player still has to assign (ATTACKER_DAMAGE).
    pub unassigned_damage_points: u32,

    /// Hex left empty by a destroyed defender (ADVANCE target).
    pub vacated_hex: Option<HexCoord>,

    /// Units taking part in the combat currently being resolved.
    pub attackers: Vec<UnitId>,

    /// Selected units, in click order.
    pub selected_units: Vec<UnitId>,

    /// Last combat result; cleared when the active player changes.
    pub combat_result: Option<CombatResult>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a fresh state in EDITOR status with GREY to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: GameStatus::Editor,
            winner: None,
            active_player: Player::Grey,
            current_turn_phase: TurnPhase::Move,
            special_phases: SpecialPhaseQueue::new(),
            unassigned_damage_points: 0,
            vacated_hex: None,
            attackers: Vec::new(),
            selected_units: Vec::new(),
            combat_result: None,
        }
    }

    /// Create a state ready for play.
    #[must_use]
    pub fn new_game(first_player: Player) -> Self {
        Self {
            status: GameStatus::GameOn,
            active_player: first_player,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn is_game_on(&self) -> bool {
        self.status == GameStatus::GameOn
    }

    #[must_use]
    pub fn current_special_phase(&self) -> Option<SpecialPhase> {
        self.special_phases.current()
    }

    /// Update the selection.
    ///
    /// - Multi-select toggles `unit` in or out of the selection.
    /// - Single-select with `None` clears the selection.
    /// - Single-select with the only selected unit deselects it; any other
    ///   unit replaces the selection.
    pub fn select_unit(&mut self, unit: Option<UnitId>, multi_select: bool) {
        match (unit, multi_select) {
            (Some(id), true) => {
                if let Some(pos) = self.selected_units.iter().position(|&u| u == id) {
                    self.selected_units.remove(pos);
                } else {
                    self.selected_units.push(id);
                }
            }
            (None, _) => self.selected_units.clear(),
            (Some(id), false) => {
                if self.selected_units.as_slice() == [id] {
                    self.selected_units.clear();
                } else {
                    self.selected_units = vec![id];
                }
            }
        }
    }

    /// Declare the winner and end the game.
    pub fn set_winner(&mut self, winner: Player) {
        self.status = GameStatus::Ended;
        self.winner = Some(winner);
    }

    /// Drop references to a unit that left the map.
    pub fn forget_unit(&mut self, unit: UnitId) {
        self.attackers.retain(|&u| u != unit);
        self.selected_units.retain(|&u| u != unit);
    }
}
