//! Turn phases and the special-phase queue.
//!
//! End-phase requests:
//! - ADVANCE current: pop it, no move forced
//! - other special phase current: ignored (ATTACKER_DAMAGE ends by itself)
//! - MOVE: go to ATTACK
//! - ATTACK: next player, MOVE, clear combat result and turn flags
//!
//! A regular phase change always clears the selection.

use tracing::{debug, info};

use super::GameEngine;
use crate::core::{SpecialPhase, TurnPhase};
use crate::events::GameEvent;

impl GameEngine {
    /// The player asked to end the current phase.
    pub fn end_current_phase(&mut self) {
        if let Err(reason) = self.accepts_intents() {
            debug!(reason, "end phase ignored");
            return;
        }

        match self.state.current_special_phase() {
            Some(SpecialPhase::Advance) => self.end_special_phase(),
            Some(special) => debug!(?special, reason = "special phase must resolve", "end phase ignored"),
            None => {
                match self.state.current_turn_phase {
                    TurnPhase::Move => self.state.current_turn_phase = TurnPhase::Attack,
                    TurnPhase::Attack => self.next_player(),
                }
                self.grid.clear_highlights();
                self.publish_phase_changed();
                self.select(None, false);
            }
        }
    }

    fn next_player(&mut self) {
        self.state.active_player = self.state.active_player.other();
        self.state.current_turn_phase = TurnPhase::Move;
        self.state.combat_result = None;
        self.publish(GameEvent::CombatResultUpdated { result: None });
        self.grid.clear_turn_flags();
        info!(player = %self.state.active_player, "turn passed");
    }

    pub(super) fn push_special_phase(&mut self, phase: SpecialPhase) {
        self.state.special_phases.push(phase);
        self.publish(GameEvent::CurrentSpecialPhaseUpdated {
            phase: self.state.current_special_phase(),
        });
    }

    /// Enter the current special phase, skipping an ADVANCE nobody can take.
    pub(super) fn start_special_phase(&mut self) {
        if !self.state.is_game_on() {
            return;
        }
        if self.state.current_special_phase() == Some(SpecialPhase::Advance) {
            if self.state.attackers.is_empty() {
                self.end_special_phase();
            } else if let Some(vacated) = self.state.vacated_hex {
                self.grid.set_highlighted(vacated, true);
            }
        }
    }

    /// Pop the current special phase and start the next one.
    pub(super) fn end_special_phase(&mut self) {
        let ended = self.state.special_phases.pop();
        self.publish(GameEvent::CurrentSpecialPhaseUpdated {
            phase: self.state.current_special_phase(),
        });

        if ended == Some(SpecialPhase::Advance) {
            self.grid.clear_highlights();
            self.state.vacated_hex = None;
            if !self.state.selected_units.is_empty() {
                self.select(None, false);
            }
        }
        if self.state.special_phases.is_empty() {
            self.state.attackers.clear();
            self.state.unassigned_damage_points = 0;
        }

        self.start_special_phase();
    }
}
