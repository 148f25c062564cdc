//! Combat resolution.
//!
//! ## Odds
//!
//! Each attacker contributes its current attack strength, scaled by the
//! attack modifier of its own hex and then by 2/3 if a river separates it
//! from the defender (both floored). The defender contributes its current
//! defend strength. The ratio picks a CRT row, which the defender's terrain
//! then shifts (clamped to the table).
//!
//! ## Outcome
//!
//! One d6 roll reads the result code. Defender losses apply at once.
//! Attacker losses apply at once for a single attacker; with several
//! attackers the player assigns them during ATTACKER_DAMAGE. A destroyed
//! defender leaves a vacated hex and, if any attacker survives, queues one
//! ADVANCE.

use tracing::debug;

use super::GameEngine;
use crate::core::{CombatResult, SpecialPhase};
use crate::events::GameEvent;
use crate::grid::GridModel;
use crate::rules::{select_row, shift_row, AttackModifier, CrtCode, COMBAT_RESULTS_TABLE};
use crate::units::UnitId;

/// Strengths and CRT rows for one prospective attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatOdds {
    pub attack_strength: u32,
    pub defend_strength: u32,
    /// Row selected by the raw ratio.
    pub base_row: usize,
    /// Row after the defender's terrain shift.
    pub row: usize,
}

impl CombatOdds {
    #[must_use]
    pub fn label(&self) -> &'static str {
        COMBAT_RESULTS_TABLE[self.row].label
    }
}

/// Compute the odds of `attackers` against `defender`.
///
/// `None` if the defender or any attacker is not on the map.
#[must_use]
pub fn compute_odds(grid: &GridModel, attackers: &[UnitId], defender: UnitId) -> Option<CombatOdds> {
    let defender_pos = grid.unit_position(defender)?;
    let defender_hex = grid.hex(defender_pos)?;
    let defend_strength = grid.unit(defender)?.defend_strength();

    let mut attack_strength = 0;
    for &id in attackers {
        let pos = grid.unit_position(id)?;
        let mut strength = grid.unit(id)?.attack_strength();
        strength = grid.hex(pos)?.terrain.attack_modifier().apply(strength);
        if grid.is_river_between(pos, defender_pos) {
            strength = AttackModifier::TWO_THIRDS.apply(strength);
        }
        attack_strength += strength;
    }

    let base_row = select_row(attack_strength, defend_strength);
    let row = shift_row(base_row, defender_hex.terrain.defender_crt_shift());
    Some(CombatOdds {
        attack_strength,
        defend_strength,
        base_row,
        row,
    })
}

impl GameEngine {
    /// Attack `defender` with the selected units adjacent to it.
    pub(super) fn attack_with_selection(&mut self, defender: UnitId) {
        let Some(defender_pos) = self.grid.unit_position(defender) else {
            return;
        };
        let neighbors = self.grid.neighbors(defender_pos);
        let attackers: Vec<UnitId> = self
            .state
            .selected_units
            .iter()
            .copied()
            .filter(|&id| {
                self.grid
                    .unit_position(id)
                    .is_some_and(|pos| neighbors.contains(&pos))
            })
            .collect();

        if attackers.is_empty() {
            debug!(defender = %defender, reason = "no adjacent selected attacker", "attack ignored");
            return;
        }
        self.resolve_attack(&attackers, defender);
    }

    /// Resolve one attack. Attackers must be adjacent to the defender.
    pub(super) fn resolve_attack(&mut self, attackers: &[UnitId], defender: UnitId) {
        let Some(odds) = compute_odds(&self.grid, attackers, defender) else {
            return;
        };
        let Some(defender_pos) = self.grid.unit_position(defender) else {
            return;
        };

        for &id in attackers {
            if let Some(unit) = self.grid.unit_mut(id) {
                unit.attacked = true;
            }
        }

        let die = self.rng.roll_d6();
        let result = CombatResult { row: odds.row, die };
        let code: CrtCode = result.code();
        let effect = code.effect();
        debug!(
            attack = odds.attack_strength,
            defend = odds.defend_strength,
            row = odds.label(),
            die,
            %code,
            "combat resolved"
        );

        self.state.combat_result = Some(result);
        self.publish(GameEvent::CombatResultUpdated { result: Some(result) });

        if effect.attacker_losses > 0 {
            if attackers.len() > 1 {
                self.state.attackers = attackers.to_vec();
                self.state.unassigned_damage_points = effect.attacker_losses;
                self.push_special_phase(SpecialPhase::AttackerDamage);
            } else {
                self.apply_step_losses(attackers[0], effect.attacker_losses);
            }
        }
        if effect.defender_losses > 0 {
            self.apply_step_losses(defender, effect.defender_losses);
        }

        self.publish(GameEvent::CombatResolved {
            attackers: attackers.to_vec(),
            defender,
        });

        let defender_dead = self.grid.unit(defender).map_or(true, |u| u.is_dead());
        if defender_dead {
            self.state.vacated_hex = Some(defender_pos);
            self.state.attackers = attackers
                .iter()
                .copied()
                .filter(|&id| self.grid.unit(id).is_some_and(|u| !u.is_dead()))
                .collect();
            if !self.state.attackers.is_empty() {
                self.push_special_phase(SpecialPhase::Advance);
            }
        }

        self.remove_dead_units();
        self.select(None, false);
        self.check_winning_conditions();
        self.start_special_phase();
    }

    /// One click during ATTACKER_DAMAGE: one step loss to `id`.
    pub(super) fn assign_attacker_damage(&mut self, id: UnitId) {
        self.apply_step_losses(id, 1);
        self.state.unassigned_damage_points = self.state.unassigned_damage_points.saturating_sub(1);
        self.remove_dead_units();
        self.check_winning_conditions();

        if self.state.unassigned_damage_points == 0 || self.state.attackers.is_empty() {
            self.state.unassigned_damage_points = 0;
            self.end_special_phase();
        }
    }

    fn apply_step_losses(&mut self, id: UnitId, steps: u32) {
        let changed = self
            .grid
            .unit_mut(id)
            .is_some_and(|unit| unit.take_step_losses(steps));
        if changed {
            self.publish_unit_updated(id);
        }
    }
}
