//! Unit instances - runtime unit state.
//!
//! `Unit` tracks the mutable combat and movement status of one piece. Its
//! position is not stored here: the grid's occupancy index is the single
//! source of truth (`GridModel::unit_position`).
//!
//! ## Health
//!
//! Health only ever degrades, one step at a time:
//! FULL -> REDUCED -> DEAD. A step loss on a DEAD unit does nothing.

use serde::{Deserialize, Serialize};

use super::definition::{UnitProperties, UnitType};
use crate::core::Player;

/// Stable identifier of a unit within one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Health of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Full,
    Reduced,
    Dead,
}

impl HealthStatus {
    /// The status after one step loss.
    #[must_use]
    pub const fn degraded(self) -> Self {
        match self {
            HealthStatus::Full => HealthStatus::Reduced,
            HealthStatus::Reduced | HealthStatus::Dead => HealthStatus::Dead,
        }
    }
}

/// A unit on the map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub player: Player,
    health: HealthStatus,

    /// Moved this turn (or advanced after combat).
    pub moved: bool,
    /// Took part in an attack this turn.
    pub attacked: bool,
    /// Advanced into a vacated hex this turn.
    pub advanced: bool,
}

impl Unit {
    /// Create a unit at full health with clear turn flags.
    #[must_use]
    pub fn new(id: UnitId, unit_type: UnitType, player: Player) -> Self {
        Self {
            id,
            unit_type,
            player,
            health: HealthStatus::Full,
            moved: false,
            attacked: false,
            advanced: false,
        }
    }

    /// Start from a given health (used when rehydrating saved units).
    ///
    /// This is the only way to set health other than `take_step_loss`.
    #[must_use]
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn health(&self) -> HealthStatus {
        self.health
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health == HealthStatus::Dead
    }

    #[must_use]
    pub fn properties(&self) -> UnitProperties {
        self.unit_type.properties()
    }

    /// Apply one step loss. Returns true if health changed.
    pub fn take_step_loss(&mut self) -> bool {
        let before = self.health;
        self.health = before.degraded();
        before != self.health
    }

    /// Apply `steps` step losses, stopping at DEAD. Returns true if health changed.
    pub fn take_step_losses(&mut self, steps: u32) -> bool {
        let mut changed = false;
        for _ in 0..steps {
            if self.is_dead() {
                break;
            }
            changed |= self.take_step_loss();
        }
        changed
    }

    /// Attack strength for the current health.
    #[must_use]
    pub fn attack_strength(&self) -> u32 {
        let props = self.properties();
        match self.health {
            HealthStatus::Full => props.attack_strength,
            HealthStatus::Reduced => props.reduced_attack_strength,
            HealthStatus::Dead => 0,
        }
    }

    /// Defend strength for the current health.
    #[must_use]
    pub fn defend_strength(&self) -> u32 {
        let props = self.properties();
        match self.health {
            HealthStatus::Full => props.defend_strength,
            HealthStatus::Reduced => props.reduced_defend_strength,
            HealthStatus::Dead => 0,
        }
    }

    #[must_use]
    pub fn movement_allowance(&self) -> u32 {
        self.unit_type.movement_allowance()
    }

    /// Clear the per-turn flags.
    pub fn reset_turn_flags(&mut self) {
        self.moved = false;
        self.attacked = false;
        self.advanced = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infantry() -> Unit {
        Unit::new(UnitId::new(1), UnitType::Infantry, Player::Grey)
    }

    #[test]
    fn test_new_unit() {
        let unit = infantry();
        assert_eq!(unit.health(), HealthStatus::Full);
        assert!(!unit.moved && !unit.attacked && !unit.advanced);
        assert_eq!(unit.movement_allowance(), 2);
    }

    #[test]
    fn test_step_losses_degrade_in_order() {
        let mut unit = infantry();

        assert!(unit.take_step_loss());
        assert_eq!(unit.health(), HealthStatus::Reduced);
        assert_eq!(unit.attack_strength(), 2);

        assert!(unit.take_step_loss());
        assert!(unit.is_dead());

        assert!(!unit.take_step_loss());
        assert_eq!(unit.health(), HealthStatus::Dead);
    }

    #[test]
    fn test_two_steps_kill_full_unit() {
        let mut unit = infantry();
        assert!(unit.take_step_losses(2));
        assert!(unit.is_dead());
    }

    #[test]
    fn test_losses_on_dead_unit_are_noop() {
        let mut unit = infantry().with_health(HealthStatus::Dead);
        assert!(!unit.take_step_losses(2));
    }

    #[test]
    fn test_strength_by_health() {
        let tank = Unit::new(UnitId::new(2), UnitType::Tank, Player::Green);
        assert_eq!((tank.attack_strength(), tank.defend_strength()), (5, 4));

        let reduced = tank.with_health(HealthStatus::Reduced);
        assert_eq!((reduced.attack_strength(), reduced.defend_strength()), (3, 2));
    }

    #[test]
    fn test_reset_turn_flags() {
        let mut unit = infantry();
        unit.moved = true;
        unit.attacked = true;
        unit.advanced = true;

        unit.reset_turn_flags();

        assert!(!unit.moved && !unit.attacked && !unit.advanced);
    }
}
