//! The grid model: cells, units and the board queries built on them.
//!
//! `GridModel` owns every `Hex` and every `Unit`. Occupancy lives only in
//! `Hex::unit`; a unit's position is derived from it, so the two can never
//! disagree.
//!
//! ## Queries
//!
//! - Adjacency: `neighbors`
//! - Rivers: `is_river_between`, `toggle_river`
//! - Zone of control: `is_in_enemy_zoc`
//! - Win check: `winner`
//! - Spawn helpers: `adjacent_empty_hexes`, `random_empty_hex_near`
//! - Combat helper: `attack_targets`
//!
//! Movement search lives in `grid::movement`.
//!
//! Coordinates outside the grid never fault: queries return `None`, `false`
//! or an empty result.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use super::coord::{opposite_edge, GridDims, HexCoord};
use super::hex::Hex;
use crate::core::{GameRng, Player};
use crate::error::{GridError, LoadError};
use crate::rules::Terrain;
use crate::units::{Unit, UnitId, UnitType};

/// Hex cells plus the canonical unit list.
#[derive(Clone, Debug)]
pub struct GridModel {
    dims: GridDims,
    hexes: Vec<Hex>,
    units: Vec<Unit>,
    next_unit_id: u32,
}

impl GridModel {
    /// Create a grid of CLEAR cells, rejecting non-positive dimensions.
    pub fn try_new(rows: i32, cols: i32) -> Result<Self, LoadError> {
        if rows <= 0 || cols <= 0 {
            return Err(LoadError::InvalidDimensions {
                rows: i64::from(rows),
                cols: i64::from(cols),
            });
        }
        let dims = GridDims::new(rows, cols);
        let hexes = dims.cells().map(Hex::new).collect();

        Ok(Self {
            dims,
            hexes,
            units: Vec::new(),
            next_unit_id: 0,
        })
    }

    /// Create a grid of CLEAR cells with dimensions known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is not positive; use `try_new` for
    /// dimensions that come from outside.
    #[must_use]
    pub fn new(rows: i32, cols: i32) -> Self {
        match Self::try_new(rows, cols) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[must_use]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    #[must_use]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[must_use]
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.dims.contains(coord)
    }

    // === Cells ===

    #[must_use]
    pub fn hex(&self, coord: HexCoord) -> Option<&Hex> {
        self.dims.index_of(coord).map(|i| &self.hexes[i])
    }

    pub(crate) fn hex_mut(&mut self, coord: HexCoord) -> Option<&mut Hex> {
        let index = self.dims.index_of(coord)?;
        Some(&mut self.hexes[index])
    }

    /// All cells in row-major order.
    pub fn hexes(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    /// In-bounds neighbours in iteration order.
    #[must_use]
    pub fn neighbors(&self, coord: HexCoord) -> SmallVec<[HexCoord; 6]> {
        self.dims.neighbors(coord)
    }

    /// Whether `coord` is enterable spawn ground: no blocking terrain, unit or flag.
    #[must_use]
    pub fn is_empty(&self, coord: HexCoord) -> bool {
        self.hex(coord).is_some_and(Hex::is_empty)
    }

    // === Units ===

    /// Units in placement order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    #[must_use]
    pub fn unit_at(&self, coord: HexCoord) -> Option<&Unit> {
        self.hex(coord)
            .and_then(|h| h.unit)
            .and_then(|id| self.unit(id))
    }

    /// Current hex of a unit.
    #[must_use]
    pub fn unit_position(&self, id: UnitId) -> Option<HexCoord> {
        self.hexes
            .iter()
            .find(|h| h.unit == Some(id))
            .map(|h| h.coord)
    }

    /// Whether `player` has any unit left.
    #[must_use]
    pub fn has_units(&self, player: Player) -> bool {
        self.units.iter().any(|u| u.player == player)
    }

    /// Put a new unit of an active type on an unoccupied hex.
    pub fn place_unit(
        &mut self,
        coord: HexCoord,
        unit_type: UnitType,
        player: Player,
    ) -> Result<UnitId, GridError> {
        if !unit_type.is_active() {
            return Err(GridError::InactiveUnitType(unit_type));
        }
        let next_id = UnitId::new(self.next_unit_id);
        let hex = self.hex_mut(coord).ok_or(GridError::OutOfBounds(coord))?;
        if hex.unit.is_some() {
            return Err(GridError::Occupied(coord));
        }
        hex.unit = Some(next_id);

        self.next_unit_id += 1;
        self.units.push(Unit::new(next_id, unit_type, player));
        Ok(next_id)
    }

    /// Take a unit off the map.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        if let Some(hex) = self.hexes.iter_mut().find(|h| h.unit == Some(id)) {
            hex.unit = None;
        }
        Some(self.units.remove(index))
    }

    pub fn remove_unit_at(&mut self, coord: HexCoord) -> Option<Unit> {
        let id = self.hex(coord)?.unit?;
        self.remove_unit(id)
    }

    /// Remove every DEAD unit, returning them in list order.
    pub fn remove_dead_units(&mut self) -> Vec<Unit> {
        let dead: Vec<UnitId> = self
            .units
            .iter()
            .filter(|u| u.is_dead())
            .map(|u| u.id)
            .collect();
        dead.into_iter()
            .filter_map(|id| self.remove_unit(id))
            .collect()
    }

    /// Relocate a unit. The destination must be free (or its own hex).
    pub fn move_unit(&mut self, id: UnitId, to: HexCoord) -> Result<(), GridError> {
        let from = self.unit_position(id).ok_or(GridError::UnknownUnit(id))?;
        if from == to {
            return Ok(());
        }
        let target = self.hex(to).ok_or(GridError::OutOfBounds(to))?;
        if target.unit.is_some() {
            return Err(GridError::Occupied(to));
        }

        if let Some(hex) = self.hex_mut(from) {
            hex.unit = None;
        }
        if let Some(hex) = self.hex_mut(to) {
            hex.unit = Some(id);
        }
        Ok(())
    }

    /// Clear moved/attacked/advanced on every unit.
    pub fn clear_turn_flags(&mut self) {
        for unit in &mut self.units {
            unit.reset_turn_flags();
        }
    }

    // === Rivers ===

    /// Whether a river runs along the shared side of two adjacent hexes.
    ///
    /// Non-adjacent or missing hexes have no river between them.
    #[must_use]
    pub fn is_river_between(&self, a: HexCoord, b: HexCoord) -> bool {
        let (Some(hex_a), Some(hex_b)) = (self.hex(a), self.hex(b)) else {
            return false;
        };
        let Some(edge) = a.edge_towards(b) else {
            return false;
        };
        hex_a.river_edges.contains(edge) || hex_b.river_edges.contains(opposite_edge(edge))
    }

    /// Flip the river on edge `edge` of `coord`.
    ///
    /// The edge is stored only on the lexicographically smaller hex; any copy
    /// on the other side is dropped. Returns false (no change) when the
    /// neighbour across the edge is not on the grid.
    pub fn toggle_river(&mut self, coord: HexCoord, edge: u8) -> bool {
        let Some(other) = coord.across_edge(edge) else {
            return false;
        };
        if !self.contains(coord) || !self.contains(other) {
            return false;
        }

        let present = self.is_river_between(coord, other);
        let (owner, owner_edge, mirror, mirror_edge) = if coord.is_canonical_owner(other) {
            (coord, edge, other, opposite_edge(edge))
        } else {
            (other, opposite_edge(edge), coord, edge)
        };

        if let Some(hex) = self.hex_mut(mirror) {
            hex.river_edges.remove(mirror_edge);
        }
        if let Some(hex) = self.hex_mut(owner) {
            if present {
                hex.river_edges.remove(owner_edge);
            } else {
                hex.river_edges.insert(owner_edge);
            }
        }
        debug!(%coord, edge, river = !present, "river toggled");
        true
    }

    // === Zone of control ===

    /// Whether an opponent of `player` projects zone of control onto `coord`.
    ///
    /// An adjacent enemy unit projects ZOC unless a river separates the two hexes.
    #[must_use]
    pub fn is_in_enemy_zoc(&self, coord: HexCoord, player: Player) -> bool {
        let enemy = player.other();
        self.neighbors(coord).into_iter().any(|adj| {
            self.unit_at(adj).is_some_and(|u| u.player == enemy)
                && !self.is_river_between(coord, adj)
        })
    }

    // === Win check ===

    /// The first player (GREY, then GREEN) meeting a win condition.
    ///
    /// A player wins when the opponent has no units left, or when one of the
    /// player's units stands on an opponent flag hex.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find(|&player| {
            let enemy = player.other();
            if !self.has_units(enemy) {
                return true;
            }
            self.hexes.iter().any(|h| {
                h.flag == Some(enemy) && self.unit_at(h.coord).is_some_and(|u| u.player == player)
            })
        })
    }

    // === Combat helpers ===

    /// Hexes holding an enemy unit adjacent to every unit in `selected`.
    ///
    /// Ordered as the neighbours of the first selected unit.
    #[must_use]
    pub fn attack_targets(&self, selected: &[UnitId]) -> Vec<HexCoord> {
        let Some((&first, rest)) = selected.split_first() else {
            return Vec::new();
        };
        let candidates = self.enemy_neighbors(first);
        candidates
            .into_iter()
            .filter(|target| rest.iter().all(|&id| self.enemy_neighbors(id).contains(target)))
            .collect()
    }

    fn enemy_neighbors(&self, id: UnitId) -> SmallVec<[HexCoord; 6]> {
        let (Some(unit), Some(pos)) = (self.unit(id), self.unit_position(id)) else {
            return SmallVec::new();
        };
        let enemy = unit.player.other();
        self.neighbors(pos)
            .into_iter()
            .filter(|&c| self.unit_at(c).is_some_and(|u| u.player == enemy))
            .collect()
    }

    // === Spawn helpers ===

    /// Distinct empty hexes reachable from `origin` through empty hexes
    /// within `depth` steps, excluding `origin`, in discovery order.
    #[must_use]
    pub fn adjacent_empty_hexes(&self, origin: HexCoord, depth: u32) -> Vec<HexCoord> {
        let mut seen: FxHashSet<HexCoord> = FxHashSet::default();
        seen.insert(origin);
        let mut found = Vec::new();
        let mut frontier = vec![origin];

        for _ in 0..depth {
            let mut next = Vec::new();
            for coord in frontier {
                for adj in self.neighbors(coord) {
                    if self.is_empty(adj) && seen.insert(adj) {
                        found.push(adj);
                        next.push(adj);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        found
    }

    /// A random empty hex near `origin` (see `adjacent_empty_hexes`).
    pub fn random_empty_hex_near(
        &self,
        origin: HexCoord,
        depth: u32,
        rng: &mut GameRng,
    ) -> Option<HexCoord> {
        rng.choose(&self.adjacent_empty_hexes(origin, depth)).copied()
    }

    // === Editing ===

    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) -> Result<(), GridError> {
        let hex = self.hex_mut(coord).ok_or(GridError::OutOfBounds(coord))?;
        hex.terrain = terrain;
        Ok(())
    }

    /// Mark (or unmark with `None`) a flag hex.
    pub fn set_flag(&mut self, coord: HexCoord, owner: Option<Player>) -> Result<(), GridError> {
        let hex = self.hex_mut(coord).ok_or(GridError::OutOfBounds(coord))?;
        hex.flag = owner;
        Ok(())
    }

    /// Set the highlight hint. Returns false for coordinates off the grid.
    pub fn set_highlighted(&mut self, coord: HexCoord, highlighted: bool) -> bool {
        match self.hex_mut(coord) {
            Some(hex) => {
                hex.highlighted = highlighted;
                true
            }
            None => false,
        }
    }

    pub fn clear_highlights(&mut self) {
        for hex in &mut self.hexes {
            hex.highlighted = false;
        }
    }

    #[must_use]
    pub fn highlighted(&self) -> Vec<HexCoord> {
        self.hexes
            .iter()
            .filter(|h| h.highlighted)
            .map(|h| h.coord)
            .collect()
    }
}
