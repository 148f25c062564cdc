//! Moves and advances after combat.
//!
//! A validated move flags the unit as moved and emits `UnitMoving` at once.
//! The unit's hex changes only in `complete_move`, called by whoever plays
//! the path animation. With `MoveCompletion::Immediate` the engine calls it
//! itself before the intent returns.

use tracing::debug;

use super::{GameEngine, PendingMove};
use crate::core::MoveCompletion;
use crate::events::GameEvent;
use crate::grid::HexCoord;
use crate::units::UnitId;

impl GameEngine {
    /// Hex click in MOVE phase: move the selected unit there if reachable.
    pub(super) fn try_move(&mut self, coord: HexCoord) {
        let Some(&id) = self.state.selected_units.first() else {
            debug!(%coord, reason = "nothing selected", "hex click ignored");
            return;
        };
        let movable = self
            .grid
            .unit(id)
            .is_some_and(|u| u.player == self.state.active_player && !u.moved);
        if !movable {
            debug!(%coord, unit = %id, reason = "unit cannot move", "hex click ignored");
            return;
        }
        let Some(path) = self.grid.find_path(id, coord) else {
            debug!(%coord, unit = %id, reason = "not reachable", "hex click ignored");
            return;
        };

        self.begin_move(id, path, false);
        self.select(None, false);
        self.finish_if_immediate();
    }

    /// Hex click during ADVANCE: move the selected attacker into the vacated hex.
    pub(super) fn try_advance(&mut self, coord: HexCoord) {
        let Some(&id) = self.state.selected_units.first() else {
            debug!(%coord, reason = "nothing selected", "advance ignored");
            return;
        };
        if !self.state.attackers.contains(&id) {
            debug!(%coord, unit = %id, reason = "not an attacker", "advance ignored");
            return;
        }
        if self.state.vacated_hex != Some(coord) {
            debug!(%coord, reason = "not the vacated hex", "advance ignored");
            return;
        }
        let Some(path) = self.grid.find_path(id, coord) else {
            debug!(%coord, unit = %id, reason = "not reachable", "advance ignored");
            return;
        };

        self.begin_move(id, path, true);
        self.select(None, false);
        self.end_special_phase();
        self.finish_if_immediate();
    }

    fn begin_move(&mut self, id: UnitId, path: Vec<HexCoord>, advance: bool) {
        let Some(&destination) = path.last() else {
            return;
        };
        if let Some(unit) = self.grid.unit_mut(id) {
            unit.moved = true;
        }
        debug!(unit = %id, %destination, steps = path.len() - 1, advance, "unit moving");
        self.pending_move = Some(PendingMove {
            unit: id,
            destination,
            advance,
        });
        self.publish(GameEvent::UnitMoving { unit: id, path });
    }

    fn finish_if_immediate(&mut self) {
        if self.config.move_completion == MoveCompletion::Immediate {
            self.complete_move();
        }
    }

    /// Finish the pending move: relocate the unit and re-check the win conditions.
    ///
    /// Returns false if no move was pending.
    pub fn complete_move(&mut self) -> bool {
        let Some(pending) = self.pending_move.take() else {
            return false;
        };
        if let Err(err) = self.grid.move_unit(pending.unit, pending.destination) {
            debug!(unit = %pending.unit, %err, "pending move dropped");
            return false;
        }
        if pending.advance {
            if let Some(unit) = self.grid.unit_mut(pending.unit) {
                unit.advanced = true;
            }
        }
        self.publish_unit_updated(pending.unit);
        self.check_winning_conditions();
        true
    }
}
