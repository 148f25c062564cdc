//! The combat results table (CRT).
//!
//! Rows are ordered by ascending odds threshold (1:3 up to 5:1). A combat
//! reads one row, picked from the attack:defence ratio and shifted by the
//! defender's terrain, then one column by a d6 roll. The resulting code maps
//! to step losses for each side via `CrtCode::effect`.

use serde::{Deserialize, Serialize};

/// A CRT result code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrtCode {
    /// Attacker loses one step.
    A1,
    /// Attacker loses two steps.
    A2,
    /// Defender loses one step.
    D1,
    /// Defender loses two steps.
    D2,
    /// Exchange: both sides lose one step.
    #[serde(rename = "EX")]
    Ex,
    /// No effect.
    #[serde(rename = "NE")]
    Ne,
}

/// Step losses produced by a result code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtEffect {
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

impl CrtCode {
    #[must_use]
    pub const fn effect(self) -> CrtEffect {
        let (attacker_losses, defender_losses) = match self {
            CrtCode::A1 => (1, 0),
            CrtCode::A2 => (2, 0),
            CrtCode::D1 => (0, 1),
            CrtCode::D2 => (0, 2),
            CrtCode::Ex => (1, 1),
            CrtCode::Ne => (0, 0),
        };
        CrtEffect {
            attacker_losses,
            defender_losses,
        }
    }
}

impl std::fmt::Display for CrtCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            CrtCode::A1 => "A1",
            CrtCode::A2 => "A2",
            CrtCode::D1 => "D1",
            CrtCode::D2 => "D2",
            CrtCode::Ex => "EX",
            CrtCode::Ne => "NE",
        };
        f.write_str(code)
    }
}

/// One odds row of the CRT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrtRow {
    /// Threshold ratio `attack : defence` as (attack, defence).
    pub ratio: (u32, u32),
    /// Display label, e.g. "3:1".
    pub label: &'static str,
    /// Result by die value 1..=6.
    pub results: [CrtCode; 6],
}

impl CrtRow {
    /// Result code for a die value. Values outside 1..=6 are clamped.
    #[must_use]
    pub fn result(&self, die: u8) -> CrtCode {
        let column = usize::from(die.clamp(1, 6)) - 1;
        self.results[column]
    }

    /// Whether `attack / defend >= threshold`, evaluated without division.
    #[must_use]
    pub fn qualifies(&self, attack: u32, defend: u32) -> bool {
        let (num, den) = self.ratio;
        u64::from(num) * u64::from(defend) <= u64::from(attack) * u64::from(den)
    }
}

use CrtCode::{Ex, Ne, A1, A2, D1, D2};

#[rustfmt::skip]
pub const COMBAT_RESULTS_TABLE: [CrtRow; 7] = [
    CrtRow { ratio: (1, 3), label: "1:3", results: [A2, A2, A1, A1, A1, Ex] },
    CrtRow { ratio: (1, 2), label: "1:2", results: [A2, A1, A1, A1, Ex, D1] },
    CrtRow { ratio: (1, 1), label: "1:1", results: [A1, A1, Ne, Ne, Ex, D1] },
    CrtRow { ratio: (2, 1), label: "2:1", results: [A1, Ne, Ex, D1, D1, D1] },
    CrtRow { ratio: (3, 1), label: "3:1", results: [A1, Ex, D1, D1, D1, D2] },
    CrtRow { ratio: (4, 1), label: "4:1", results: [Ex, Ex, D1, D1, D1, D2] },
    CrtRow { ratio: (5, 1), label: "5:1", results: [D1, D1, D1, D2, D2, D2] },
];

/// Index of the last row whose threshold is at or below `attack / defend`.
///
/// Falls back to row 0 when the odds are worse than the lowest row. A zero
/// defence selects the best row.
#[must_use]
pub fn select_row(attack: u32, defend: u32) -> usize {
    if defend == 0 {
        return COMBAT_RESULTS_TABLE.len() - 1;
    }
    COMBAT_RESULTS_TABLE
        .iter()
        .rposition(|row| row.qualifies(attack, defend))
        .unwrap_or(0)
}

/// Apply a signed column shift to a row index, clamped to the table.
#[must_use]
pub fn shift_row(row: usize, shift: i32) -> usize {
    let last = COMBAT_RESULTS_TABLE.len() as i64 - 1;
    (row as i64 + i64::from(shift)).clamp(0, last) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_to_one_row() {
        let row = select_row(12, 4);
        assert_eq!(COMBAT_RESULTS_TABLE[row].label, "3:1");
        assert_eq!(COMBAT_RESULTS_TABLE[row].result(1), CrtCode::A1);
        assert_eq!(CrtCode::A1.effect().attacker_losses, 1);
    }

    #[test]
    fn test_row_selection_boundaries() {
        // exactly 1:1
        assert_eq!(COMBAT_RESULTS_TABLE[select_row(3, 3)].label, "1:1");
        // just below 2:1
        assert_eq!(COMBAT_RESULTS_TABLE[select_row(7, 4)].label, "1:1");
        // below 1:3 falls back to the lowest row
        assert_eq!(select_row(1, 4), 0);
        // beyond 5:1 stays on the last row
        assert_eq!(COMBAT_RESULTS_TABLE[select_row(30, 2)].label, "5:1");
        // 1:3 exactly
        assert_eq!(COMBAT_RESULTS_TABLE[select_row(1, 3)].label, "1:3");
        assert_eq!(COMBAT_RESULTS_TABLE[select_row(2, 3)].label, "1:2");
    }

    #[test]
    fn test_shift_clamps() {
        assert_eq!(shift_row(2, -1), 1);
        assert_eq!(shift_row(0, -1), 0);
        assert_eq!(shift_row(6, 1), 6);
        assert_eq!(shift_row(3, 0), 3);
        assert_eq!(shift_row(1, -5), 0);
    }

    #[test]
    fn test_effects() {
        assert_eq!(CrtCode::A2.effect(), CrtEffect { attacker_losses: 2, defender_losses: 0 });
        assert_eq!(CrtCode::D2.effect(), CrtEffect { attacker_losses: 0, defender_losses: 2 });
        assert_eq!(CrtCode::Ex.effect(), CrtEffect { attacker_losses: 1, defender_losses: 1 });
        assert_eq!(CrtCode::Ne.effect(), CrtEffect::default());
    }

    #[test]
    fn test_code_display_and_serde() {
        assert_eq!(CrtCode::Ex.to_string(), "EX");
        assert_eq!(serde_json::to_string(&CrtCode::Ne).unwrap(), "\"NE\"");
        assert_eq!(serde_json::to_string(&CrtCode::D2).unwrap(), "\"D2\"");
    }
}
