//! Save data: a full session as plain data.
//!
//! Units have no serializable identity, so the game state refers to them by
//! their coordinates as `"x,y"` strings. Restoring re-resolves those against
//! the rebuilt grid.
//!
//! `restore` validates everything and builds a fresh engine; it never
//! touches an existing one.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::scenario::{check_dims, check_river_edges};
use crate::core::{
    CombatResult, EngineConfig, GameRng, GameRngState, GameState, GameStatus, Player,
    SpecialPhase, SpecialPhaseQueue, TurnPhase,
};
use crate::engine::GameEngine;
use crate::error::LoadError;
use crate::grid::{GridModel, HexCoord};
use crate::rules::{Terrain, COMBAT_RESULTS_TABLE};
use crate::units::{HealthStatus, UnitId, UnitType};

/// Game-state fields of a save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGameState {
    pub status: GameStatus,
    pub winner: Option<Player>,
    pub active_player: Player,
    pub current_turn_phase: TurnPhase,
    pub unassigned_damage_points: u32,
    pub special_phase_queue: Vec<SpecialPhase>,
    /// Index of the CRT row of the last combat.
    pub crt_row: Option<usize>,
    pub d6_value: Option<u8>,
    pub vacated_hex: Option<HexCoord>,
    pub attackers: Vec<String>,
    pub selected_units: Vec<String>,
}

/// One saved cell. `player` is the flag owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedHex {
    pub x: i32,
    pub y: i32,
    pub terrain_type: Terrain,
    #[serde(default)]
    pub river_edges: Vec<u8>,
    #[serde(default)]
    pub flag: bool,
    #[serde(default)]
    pub player: Option<Player>,
}

/// One saved unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedUnit {
    pub x: i32,
    pub y: i32,
    pub unit_type: UnitType,
    pub player: Player,
    pub health_status: HealthStatus,
    #[serde(default)]
    pub moved: bool,
    #[serde(default)]
    pub attacked: bool,
    #[serde(default)]
    pub advanced: bool,
}

/// A whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    /// Grid size; derived from the largest hex coordinates when absent.
    #[serde(default)]
    pub rows: Option<i32>,
    #[serde(default)]
    pub cols: Option<i32>,
    pub game_state: SavedGameState,
    pub hexes: Vec<SavedHex>,
    pub units: Vec<SavedUnit>,
    /// Die sequence position; a fresh RNG from the config seed when absent.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

fn unit_ref(coord: HexCoord) -> String {
    format!("{},{}", coord.x, coord.y)
}

fn parse_unit_ref(reference: &str) -> Result<HexCoord, LoadError> {
    let malformed = || LoadError::MalformedReference(reference.to_string());
    let (x, y) = reference.split_once(',').ok_or_else(malformed)?;
    let x = x.trim().parse().map_err(|_| malformed())?;
    let y = y.trim().parse().map_err(|_| malformed())?;
    Ok(HexCoord::new(x, y))
}

impl SaveData {
    /// Capture the session held by `engine`.
    ///
    /// A move still waiting for completion is saved at its origin.
    #[must_use]
    pub fn capture(engine: &GameEngine) -> Self {
        let grid = engine.grid();
        let state = engine.state();
        let refs = |ids: &[UnitId]| -> Vec<String> {
            ids.iter()
                .filter_map(|&id| grid.unit_position(id))
                .map(unit_ref)
                .collect()
        };

        let game_state = SavedGameState {
            status: state.status,
            winner: state.winner,
            active_player: state.active_player,
            current_turn_phase: state.current_turn_phase,
            unassigned_damage_points: state.unassigned_damage_points,
            special_phase_queue: state.special_phases.iter().collect(),
            crt_row: state.combat_result.map(|r| r.row),
            d6_value: state.combat_result.map(|r| r.die),
            vacated_hex: state.vacated_hex,
            attackers: refs(&state.attackers),
            selected_units: refs(&state.selected_units),
        };

        let hexes = grid
            .hexes()
            .map(|hex| SavedHex {
                x: hex.coord.x,
                y: hex.coord.y,
                terrain_type: hex.terrain,
                river_edges: hex.river_edges().iter().collect(),
                flag: hex.flag.is_some(),
                player: hex.flag,
            })
            .collect();

        let units = grid
            .units()
            .iter()
            .filter_map(|unit| {
                let pos = grid.unit_position(unit.id)?;
                Some(SavedUnit {
                    x: pos.x,
                    y: pos.y,
                    unit_type: unit.unit_type,
                    player: unit.player,
                    health_status: unit.health(),
                    moved: unit.moved,
                    attacked: unit.attacked,
                    advanced: unit.advanced,
                })
            })
            .collect();

        Self {
            rows: Some(grid.rows()),
            cols: Some(grid.cols()),
            game_state,
            hexes,
            units,
            rng: Some(engine.rng().state()),
        }
    }

    /// Build a new engine from this save.
    pub fn restore(&self, config: EngineConfig) -> Result<GameEngine, LoadError> {
        let mut grid = self.build_grid()?;
        let state = self.build_state(&grid)?;
        if state.current_special_phase() == Some(SpecialPhase::Advance) {
            if let Some(vacated) = state.vacated_hex {
                grid.set_highlighted(vacated, true);
            }
        }
        let rng = match &self.rng {
            Some(rng) => GameRng::from_state(rng),
            None => GameRng::new(config.seed),
        };
        Ok(GameEngine::from_parts(state, grid, rng, config))
    }

    fn dims(&self) -> (i32, i32) {
        let rows = self
            .rows
            .unwrap_or_else(|| self.hexes.iter().map(|h| h.y + 1).max().unwrap_or(0));
        let cols = self
            .cols
            .unwrap_or_else(|| self.hexes.iter().map(|h| h.x + 1).max().unwrap_or(0));
        (rows, cols)
    }

    fn build_grid(&self) -> Result<GridModel, LoadError> {
        let (rows, cols) = self.dims();
        let dims = check_dims(rows, cols)?;

        let mut seen = FxHashSet::default();
        for saved in &self.hexes {
            let coord = HexCoord::new(saved.x, saved.y);
            if !dims.contains(coord) {
                return Err(LoadError::HexOutOfBounds(coord));
            }
            if !seen.insert(coord) {
                return Err(LoadError::DuplicateHex(coord));
            }
            check_river_edges(coord, &saved.river_edges)?;
        }
        let mut occupied = FxHashSet::default();
        for saved in &self.units {
            let coord = HexCoord::new(saved.x, saved.y);
            if !dims.contains(coord) {
                return Err(LoadError::HexOutOfBounds(coord));
            }
            if !saved.unit_type.is_active() {
                return Err(LoadError::InactiveUnitType {
                    coord,
                    unit_type: saved.unit_type,
                });
            }
            if !occupied.insert(coord) {
                return Err(LoadError::DuplicateUnit(coord));
            }
        }

        let mut grid = GridModel::try_new(dims.rows, dims.cols)?;
        for saved in &self.hexes {
            let coord = HexCoord::new(saved.x, saved.y);
            let edges = check_river_edges(coord, &saved.river_edges)?;
            if let Some(hex) = grid.hex_mut(coord) {
                hex.terrain = saved.terrain_type;
                hex.river_edges = edges;
                hex.flag = if saved.flag { saved.player } else { None };
            }
        }
        for saved in &self.units {
            let coord = HexCoord::new(saved.x, saved.y);
            let id = grid.place_unit(coord, saved.unit_type, saved.player)?;
            if let Some(unit) = grid.unit_mut(id) {
                *unit = unit.clone().with_health(saved.health_status);
                unit.moved = saved.moved;
                unit.attacked = saved.attacked;
                unit.advanced = saved.advanced;
            }
        }
        Ok(grid)
    }

    fn build_state(&self, grid: &GridModel) -> Result<GameState, LoadError> {
        let saved = &self.game_state;
        let resolve = |refs: &[String]| -> Result<Vec<UnitId>, LoadError> {
            refs.iter()
                .map(|r| {
                    let coord = parse_unit_ref(r)?;
                    grid.unit_at(coord)
                        .map(|u| u.id)
                        .ok_or_else(|| LoadError::UnknownUnitReference(r.clone()))
                })
                .collect()
        };

        let combat_result = match (saved.crt_row, saved.d6_value) {
            (None, None) => None,
            (Some(row), Some(die)) if row < COMBAT_RESULTS_TABLE.len() && (1..=6).contains(&die) => {
                Some(CombatResult { row, die })
            }
            _ => {
                return Err(LoadError::InconsistentState(
                    "combat result needs a valid CRT row and die value".to_string(),
                ))
            }
        };
        if let Some(coord) = saved.vacated_hex {
            if !grid.contains(coord) {
                return Err(LoadError::HexOutOfBounds(coord));
            }
        }
        if saved.status == GameStatus::Ended && saved.winner.is_none() {
            return Err(LoadError::InconsistentState("ended game without a winner".to_string()));
        }

        Ok(GameState {
            status: saved.status,
            winner: saved.winner,
            active_player: saved.active_player,
            current_turn_phase: saved.current_turn_phase,
            special_phases: saved.special_phase_queue.iter().copied().collect::<SpecialPhaseQueue>(),
            unassigned_damage_points: saved.unassigned_damage_points,
            vacated_hex: saved.vacated_hex,
            attackers: resolve(&saved.attackers)?,
            selected_units: resolve(&saved.selected_units)?,
            combat_result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_ref() {
        assert_eq!(parse_unit_ref("3,4").unwrap(), HexCoord::new(3, 4));
        assert_eq!(parse_unit_ref(" 0 , 12 ").unwrap(), HexCoord::new(0, 12));
        assert!(matches!(parse_unit_ref("3;4"), Err(LoadError::MalformedReference(_))));
        assert!(matches!(parse_unit_ref("a,4"), Err(LoadError::MalformedReference(_))));
        assert_eq!(unit_ref(HexCoord::new(5, 1)), "5,1");
    }

    #[test]
    fn test_capture_and_restore() {
        let mut grid = GridModel::new(4, 5);
        grid.set_terrain(HexCoord::new(1, 1), Terrain::Forest).unwrap();
        grid.set_flag(HexCoord::new(4, 0), Some(Player::Green)).unwrap();
        grid.place_unit(HexCoord::new(0, 0), UnitType::Tank, Player::Grey).unwrap();
        let green = grid.place_unit(HexCoord::new(3, 2), UnitType::Infantry, Player::Green).unwrap();
        grid.unit_mut(green).unwrap().take_step_loss();

        let engine = GameEngine::new(grid, EngineConfig::new().with_seed(9));
        let save = SaveData::capture(&engine);
        let restored = save.restore(EngineConfig::new()).unwrap();

        assert_eq!(restored.state(), engine.state());
        assert_eq!(restored.rng().state(), engine.rng().state());
        let unit = restored.grid().unit_at(HexCoord::new(3, 2)).unwrap();
        assert_eq!(unit.health(), HealthStatus::Reduced);
        assert_eq!(restored.grid().hex(HexCoord::new(4, 0)).unwrap().flag, Some(Player::Green));
        assert_eq!(SaveData::capture(&restored), save);
    }

    #[test]
    fn test_restore_rejects_bad_references() {
        let grid = GridModel::new(3, 3);
        let engine = GameEngine::new(grid, EngineConfig::new());
        let mut save = SaveData::capture(&engine);

        save.game_state.selected_units = vec!["1,1".to_string()];
        assert_eq!(
            save.restore(EngineConfig::new()).unwrap_err(),
            LoadError::UnknownUnitReference("1,1".to_string())
        );

        save.game_state.selected_units = vec!["x".to_string()];
        assert!(matches!(
            save.restore(EngineConfig::new()),
            Err(LoadError::MalformedReference(_))
        ));
    }
}
