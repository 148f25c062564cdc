//! Unit types and their static statistics.

use serde::{Deserialize, Serialize};

/// Kind of a unit.
///
/// `Artillery` has a stat line but is inactive: scenarios and the editor
/// refuse to place it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Infantry,
    Tank,
    Artillery,
}

/// Static statistics of a unit type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitProperties {
    pub movement_allowance: u32,
    pub attack_range: u32,
    pub attack_strength: u32,
    pub defend_strength: u32,
    pub reduced_attack_strength: u32,
    pub reduced_defend_strength: u32,
}

impl UnitType {
    /// Types that may appear on the map.
    pub const ACTIVE: [UnitType; 2] = [UnitType::Infantry, UnitType::Tank];

    #[must_use]
    pub const fn properties(self) -> UnitProperties {
        match self {
            UnitType::Infantry => UnitProperties {
                movement_allowance: 2,
                attack_range: 1,
                attack_strength: 3,
                defend_strength: 3,
                reduced_attack_strength: 2,
                reduced_defend_strength: 2,
            },
            UnitType::Tank => UnitProperties {
                movement_allowance: 3,
                attack_range: 1,
                attack_strength: 5,
                defend_strength: 4,
                reduced_attack_strength: 3,
                reduced_defend_strength: 2,
            },
            UnitType::Artillery => UnitProperties {
                movement_allowance: 1,
                attack_range: 2,
                attack_strength: 4,
                defend_strength: 3,
                reduced_attack_strength: 2,
                reduced_defend_strength: 1,
            },
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, UnitType::Artillery)
    }

    #[must_use]
    pub const fn movement_allowance(self) -> u32 {
        self.properties().movement_allowance
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitType::Infantry => f.write_str("infantry"),
            UnitType::Tank => f.write_str("tank"),
            UnitType::Artillery => f.write_str("artillery"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_lines() {
        let infantry = UnitType::Infantry.properties();
        assert_eq!(infantry.movement_allowance, 2);
        assert_eq!((infantry.attack_strength, infantry.defend_strength), (3, 3));
        assert_eq!((infantry.reduced_attack_strength, infantry.reduced_defend_strength), (2, 2));

        let tank = UnitType::Tank.properties();
        assert_eq!(tank.movement_allowance, 3);
        assert_eq!((tank.attack_strength, tank.defend_strength), (5, 4));
        assert_eq!((tank.reduced_attack_strength, tank.reduced_defend_strength), (3, 2));
    }

    #[test]
    fn test_artillery_inactive() {
        assert!(!UnitType::Artillery.is_active());
        assert!(UnitType::ACTIVE.iter().all(|t| t.is_active()));
        assert!(!UnitType::ACTIVE.contains(&UnitType::Artillery));
    }
}
