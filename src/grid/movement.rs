//! Reachable-hex search and path reconstruction.
//!
//! The search is a depth-first exploration from the mover's origin with a
//! movement-point budget:
//!
//! - Entering a hex costs its terrain's movement cost, or `MAX_MOVEMENT_COST`
//!   if any unit stands there. Crossing a river adds 1.
//! - A hex whose cost exceeds the remaining budget is visited but not entered.
//! - A revisit is explored again only when it arrives with strictly more
//!   remaining points than the best earlier visit of the same ZOC class.
//! - Nothing is expanded past a hex in enemy zone of control.
//!
//! Every entered hex records its predecessor and accumulated cost, so the
//! chosen path to any reachable hex can be rebuilt afterwards.

use rustc_hash::FxHashMap;
use tracing::trace;

use super::coord::HexCoord;
use super::model::GridModel;
use crate::core::Player;
use crate::rules::MAX_MOVEMENT_COST;
use crate::units::UnitId;

/// Result of a reachable-hex search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reachable {
    /// Reachable hexes in discovery order.
    pub hexes: Vec<HexCoord>,
    /// Predecessor of each reachable hex on its best-known path.
    pub came_from: FxHashMap<HexCoord, HexCoord>,
    /// Movement points spent to reach each hex.
    pub cost_so_far: FxHashMap<HexCoord, u32>,
}

impl Reachable {
    #[must_use]
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.came_from.contains_key(&coord)
    }

    #[must_use]
    pub fn cost_to(&self, coord: HexCoord) -> Option<u32> {
        self.cost_so_far.get(&coord).copied()
    }

    /// Ordered path from the origin to `dest`, both inclusive.
    ///
    /// `None` if `dest` was never reached.
    #[must_use]
    pub fn path_to(&self, dest: HexCoord) -> Option<Vec<HexCoord>> {
        if !self.contains(dest) {
            return None;
        }
        let mut path = vec![dest];
        let mut current = dest;
        // remaining points strictly grow towards the origin, so the chain ends
        while let Some(&prev) = self.came_from.get(&current) {
            path.push(prev);
            current = prev;
            debug_assert!(path.len() <= self.came_from.len() + 1, "predecessor cycle");
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Clone, Copy)]
struct Visit {
    points: u32,
    in_zoc: bool,
}

struct Search<'a> {
    grid: &'a GridModel,
    player: Player,
    visited: FxHashMap<HexCoord, Visit>,
    result: Reachable,
}

impl Search<'_> {
    fn step(&mut self, coord: HexCoord, points: u32, from: HexCoord) {
        let Some(hex) = self.grid.hex(coord) else {
            return;
        };
        let in_zoc = self.grid.is_in_enemy_zoc(coord, self.player);

        let existing = self.visited.get(&coord).copied();
        if let Some(visit) = existing {
            if visit.in_zoc == in_zoc && visit.points >= points {
                return;
            }
        }

        let mut cost = if hex.unit.is_some() {
            MAX_MOVEMENT_COST
        } else {
            hex.terrain.movement_cost()
        };
        if self.grid.is_river_between(from, coord) {
            cost += 1;
        }

        if points < cost {
            if existing.is_none() {
                self.visited.insert(coord, Visit { points, in_zoc });
            }
            return;
        }

        self.visited.insert(coord, Visit { points, in_zoc });
        if !self.result.came_from.contains_key(&coord) {
            self.result.hexes.push(coord);
        }
        self.result.came_from.insert(coord, from);
        let base = self.result.cost_so_far.get(&from).copied().unwrap_or(0);
        self.result.cost_so_far.insert(coord, base + cost);

        let remaining = points - cost;
        if remaining > 0 && !in_zoc {
            for adj in self.grid.neighbors(coord) {
                self.step(adj, remaining, coord);
            }
        }
    }
}

impl GridModel {
    /// Hexes a unit of `player` at `origin` can enter with `movement_points`.
    ///
    /// The origin itself is never part of the result.
    #[must_use]
    pub fn reachable_hexes(&self, origin: HexCoord, movement_points: u32, player: Player) -> Reachable {
        if !self.contains(origin) {
            return Reachable::default();
        }

        let mut search = Search {
            grid: self,
            player,
            visited: FxHashMap::default(),
            result: Reachable::default(),
        };
        search.visited.insert(
            origin,
            Visit {
                points: movement_points,
                in_zoc: self.is_in_enemy_zoc(origin, player),
            },
        );
        search.result.cost_so_far.insert(origin, 0);

        for adj in self.neighbors(origin) {
            search.step(adj, movement_points, origin);
        }

        // the origin only seeds the cost map
        search.result.cost_so_far.remove(&origin);
        trace!(
            %origin,
            movement_points,
            reachable = search.result.hexes.len(),
            "reachable search done"
        );
        search.result
    }

    /// Reachable set for a unit on the map, using its own movement allowance.
    #[must_use]
    pub fn reachable_for(&self, unit: UnitId) -> Reachable {
        match (self.unit(unit), self.unit_position(unit)) {
            (Some(u), Some(pos)) => self.reachable_hexes(pos, u.movement_allowance(), u.player),
            _ => Reachable::default(),
        }
    }

    /// Path for `unit` from its hex to `dest`, or `None` when `dest` is not reachable.
    #[must_use]
    pub fn find_path(&self, unit: UnitId, dest: HexCoord) -> Option<Vec<HexCoord>> {
        self.reachable_for(unit).path_to(dest)
    }
}
