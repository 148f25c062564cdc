//! Terrain kinds and their movement/combat properties.

use serde::{Deserialize, Serialize};

/// Movement cost standing in for "impassable".
pub const MAX_MOVEMENT_COST: u32 = 9999;

/// A rational strength multiplier, applied with flooring.
///
/// Kept as a fraction so that e.g. `3 * 2/3` is exactly `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackModifier {
    pub numerator: u32,
    pub denominator: u32,
}

impl AttackModifier {
    /// No change.
    pub const NONE: AttackModifier = AttackModifier::new(1, 1);
    /// Two thirds, floored. Also the penalty for attacking across a river.
    pub const TWO_THIRDS: AttackModifier = AttackModifier::new(2, 3);

    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }

    /// `floor(strength * numerator / denominator)`.
    #[must_use]
    pub const fn apply(self, strength: u32) -> u32 {
        strength * self.numerator / self.denominator
    }
}

/// Terrain of a hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    Clear,
    Mountain,
    Water,
    Forest,
    Flag,
    Swamp,
    City,
}

/// Static properties of a terrain kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainProperties {
    /// Movement points needed to enter.
    pub movement_cost: u32,
    /// CRT column shift when the defender stands here (negative favours the defender).
    pub defender_crt_shift: i32,
    /// Multiplier on the strength of a unit attacking *from* here.
    pub attack_modifier: AttackModifier,
}

impl Terrain {
    /// All terrain kinds.
    pub const ALL: [Terrain; 7] = [
        Terrain::Clear,
        Terrain::Mountain,
        Terrain::Water,
        Terrain::Forest,
        Terrain::Flag,
        Terrain::Swamp,
        Terrain::City,
    ];

    #[must_use]
    pub const fn properties(self) -> TerrainProperties {
        match self {
            Terrain::Clear | Terrain::Flag => TerrainProperties {
                movement_cost: 1,
                defender_crt_shift: 0,
                attack_modifier: AttackModifier::NONE,
            },
            Terrain::Forest | Terrain::City => TerrainProperties {
                movement_cost: 2,
                defender_crt_shift: -1,
                attack_modifier: AttackModifier::NONE,
            },
            Terrain::Swamp => TerrainProperties {
                movement_cost: 2,
                defender_crt_shift: 0,
                attack_modifier: AttackModifier::TWO_THIRDS,
            },
            Terrain::Mountain | Terrain::Water => TerrainProperties {
                movement_cost: MAX_MOVEMENT_COST,
                defender_crt_shift: 0,
                attack_modifier: AttackModifier::NONE,
            },
        }
    }

    #[must_use]
    pub const fn movement_cost(self) -> u32 {
        self.properties().movement_cost
    }

    #[must_use]
    pub const fn defender_crt_shift(self) -> i32 {
        self.properties().defender_crt_shift
    }

    #[must_use]
    pub const fn attack_modifier(self) -> AttackModifier {
        self.properties().attack_modifier
    }

    /// Terrain that makes a hex count as non-empty for placement searches.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(
            self,
            Terrain::Mountain | Terrain::Forest | Terrain::Swamp | Terrain::Water | Terrain::City
        )
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Terrain::Clear => "clear",
            Terrain::Mountain => "mountain",
            Terrain::Water => "water",
            Terrain::Forest => "forest",
            Terrain::Flag => "flag",
            Terrain::Swamp => "swamp",
            Terrain::City => "city",
        };
        f.write_str(name)
    }
}
