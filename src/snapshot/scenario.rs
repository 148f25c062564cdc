//! Scenario maps: the plain-data description a game starts from.
//!
//! JSON shape:
//!
//! ```json
//! { "width": 8, "height": 6,
//!   "hexList": [ { "x": 1, "y": 2, "terrain": "forest", "unit": "tank",
//!                  "player": "grey", "riverEdges": [0, 1], "flag": false } ] }
//! ```
//!
//! `player` owns both the unit and the flag of its hex. Cells missing from
//! `hexList` are CLEAR with no river and no flag.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::error::LoadError;
use crate::grid::{GridDims, GridModel, HexCoord, RiverEdges};
use crate::rules::Terrain;
use crate::units::UnitType;

/// One map cell as stored in a scenario.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapHex {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub terrain: Option<Terrain>,
    #[serde(default)]
    pub unit: Option<UnitType>,
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub river_edges: Vec<u8>,
    #[serde(default)]
    pub flag: bool,
}

impl MapHex {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.x, self.y)
    }
}

/// A scenario map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Columns.
    pub width: i32,
    /// Rows.
    pub height: i32,
    #[serde(rename = "hexList", default)]
    pub hexes: Vec<MapHex>,
}

impl Scenario {
    /// A blank map with one entry per cell of the `rows` x `cols` rectangle.
    #[must_use]
    pub fn empty(rows: i32, cols: i32) -> Self {
        let hexes = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| MapHex::new(x, y)))
            .collect();
        Self {
            width: cols,
            height: rows,
            hexes,
        }
    }

    /// Export the current map of `grid`, units included.
    #[must_use]
    pub fn from_grid(grid: &GridModel) -> Self {
        let hexes = grid
            .hexes()
            .map(|hex| {
                let unit = grid.unit_at(hex.coord);
                MapHex {
                    x: hex.coord.x,
                    y: hex.coord.y,
                    terrain: Some(hex.terrain),
                    unit: unit.map(|u| u.unit_type),
                    player: unit.map(|u| u.player).or(hex.flag),
                    river_edges: hex.river_edges().iter().collect(),
                    flag: hex.flag.is_some(),
                }
            })
            .collect();
        Self {
            width: grid.cols(),
            height: grid.rows(),
            hexes,
        }
    }
}

pub(crate) fn check_dims(rows: i32, cols: i32) -> Result<GridDims, LoadError> {
    if rows <= 0 || cols <= 0 {
        return Err(LoadError::InvalidDimensions {
            rows: i64::from(rows),
            cols: i64::from(cols),
        });
    }
    Ok(GridDims::new(rows, cols))
}

pub(crate) fn check_river_edges(coord: HexCoord, edges: &[u8]) -> Result<RiverEdges, LoadError> {
    RiverEdges::try_from(edges.to_vec())
        .map_err(|err| LoadError::InvalidRiverEdge { coord, edge: err.0 })
}

fn in_rectangle(dims: GridDims, coord: HexCoord) -> bool {
    (0..dims.cols).contains(&coord.x) && (0..dims.rows).contains(&coord.y)
}

impl GridModel {
    /// Build a grid from a scenario.
    ///
    /// Entries for the missing odd cells of the last row are skipped, as long
    /// as they carry no unit. Everything is validated before the grid is built.
    pub fn from_scenario(scenario: &Scenario) -> Result<GridModel, LoadError> {
        let dims = check_dims(scenario.height, scenario.width)?;

        let mut seen = FxHashSet::default();
        let mut cells = Vec::with_capacity(scenario.hexes.len());
        for map_hex in &scenario.hexes {
            let coord = map_hex.coord();
            if !in_rectangle(dims, coord) {
                return Err(LoadError::HexOutOfBounds(coord));
            }
            if !seen.insert(coord) {
                return Err(LoadError::DuplicateHex(coord));
            }
            if !dims.contains(coord) {
                if map_hex.unit.is_some() {
                    return Err(LoadError::HexOutOfBounds(coord));
                }
                continue;
            }

            let edges = check_river_edges(coord, &map_hex.river_edges)?;
            if let Some(unit_type) = map_hex.unit {
                if !unit_type.is_active() {
                    return Err(LoadError::InactiveUnitType { coord, unit_type });
                }
                if map_hex.player.is_none() {
                    return Err(LoadError::UnitWithoutPlayer(coord));
                }
            }
            cells.push((map_hex, edges));
        }

        let mut grid = GridModel::try_new(dims.rows, dims.cols)?;
        for (map_hex, edges) in cells {
            let coord = map_hex.coord();
            if let Some(hex) = grid.hex_mut(coord) {
                hex.terrain = map_hex.terrain.unwrap_or_default();
                hex.river_edges = edges;
                hex.flag = if map_hex.flag { map_hex.player } else { None };
            }
            if let (Some(unit_type), Some(player)) = (map_hex.unit, map_hex.player) {
                grid.place_unit(coord, unit_type, player)?;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> HexCoord {
        HexCoord::new(x, y)
    }

    #[test]
    fn test_empty_scenario_builds_clear_grid() {
        let grid = GridModel::from_scenario(&Scenario::empty(3, 4)).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 4));
        assert!(grid.hexes().all(|h| h.terrain == Terrain::Clear && h.is_empty()));
        assert!(grid.units().is_empty());
    }

    #[test]
    fn test_scenario_json() {
        let json = r#"{
            "width": 4, "height": 3,
            "hexList": [
                { "x": 1, "y": 1, "terrain": "forest", "unit": "tank", "player": "grey" },
                { "x": 2, "y": 0, "riverEdges": [1], "flag": true, "player": "green" },
                { "x": 3, "y": 1, "unit": "infantry", "player": "green" }
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        let grid = GridModel::from_scenario(&scenario).unwrap();

        assert_eq!(grid.hex(c(1, 1)).unwrap().terrain, Terrain::Forest);
        assert_eq!(grid.unit_at(c(1, 1)).unwrap().player, Player::Grey);
        assert_eq!(grid.hex(c(2, 0)).unwrap().flag, Some(Player::Green));
        assert!(grid.unit_at(c(2, 0)).is_none());
        assert!(grid.is_river_between(c(2, 0), c(2, 1)));
        assert_eq!(grid.units().len(), 2);
    }

    #[test]
    fn test_scenario_errors() {
        let mut s = Scenario::empty(3, 3);
        s.hexes[0].unit = Some(UnitType::Artillery);
        s.hexes[0].player = Some(Player::Grey);
        assert!(matches!(
            GridModel::from_scenario(&s),
            Err(LoadError::InactiveUnitType { .. })
        ));

        let mut s = Scenario::empty(3, 3);
        s.hexes[0].unit = Some(UnitType::Tank);
        assert_eq!(GridModel::from_scenario(&s).unwrap_err(), LoadError::UnitWithoutPlayer(c(0, 0)));

        let mut s = Scenario::empty(3, 3);
        s.hexes[4].river_edges = vec![7];
        assert_eq!(
            GridModel::from_scenario(&s).unwrap_err(),
            LoadError::InvalidRiverEdge { coord: c(1, 1), edge: 7 }
        );

        let mut s = Scenario::empty(3, 3);
        s.hexes.push(MapHex::new(0, 0));
        assert_eq!(GridModel::from_scenario(&s).unwrap_err(), LoadError::DuplicateHex(c(0, 0)));

        let mut s = Scenario::empty(3, 3);
        s.hexes.push(MapHex::new(5, 0));
        assert_eq!(GridModel::from_scenario(&s).unwrap_err(), LoadError::HexOutOfBounds(c(5, 0)));

        let s = Scenario { width: 0, height: 3, hexes: vec![] };
        assert!(matches!(
            GridModel::from_scenario(&s),
            Err(LoadError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_unit_on_missing_cell_rejected() {
        let mut s = Scenario::empty(3, 4);
        let cell = s.hexes.iter_mut().find(|h| h.x == 1 && h.y == 2).unwrap();
        cell.unit = Some(UnitType::Infantry);
        cell.player = Some(Player::Grey);
        assert_eq!(GridModel::from_scenario(&s).unwrap_err(), LoadError::HexOutOfBounds(c(1, 2)));
    }

    #[test]
    fn test_export_round_trip() {
        let mut grid = GridModel::new(4, 4);
        grid.set_terrain(c(1, 1), Terrain::City).unwrap();
        grid.set_flag(c(0, 2), Some(Player::Grey)).unwrap();
        grid.toggle_river(c(2, 1), 0);
        grid.place_unit(c(3, 1), UnitType::Tank, Player::Green).unwrap();

        let rebuilt = GridModel::from_scenario(&Scenario::from_grid(&grid)).unwrap();

        assert_eq!(rebuilt.hex(c(1, 1)).unwrap().terrain, Terrain::City);
        assert_eq!(rebuilt.hex(c(0, 2)).unwrap().flag, Some(Player::Grey));
        assert!(rebuilt.is_river_between(c(2, 1), c(2, 1).across_edge(0).unwrap()));
        assert_eq!(rebuilt.unit_at(c(3, 1)).unwrap().unit_type, UnitType::Tank);
    }
}
