//! Offset hex coordinates and neighbour tables.
//!
//! Columns are staggered: odd columns sit half a hex lower than even ones.
//! The last row only has cells in even columns.
//!
//! Two offset tables exist per column parity:
//! - the adjacency table, whose order is the neighbour iteration order
//! - the edge table, indexed by river edge number 0..=5, where edge `e` and
//!   edge `(e + 3) % 6` of the neighbour are the same physical side

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// A hex position in offset coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn is_even_column(self) -> bool {
        self.x % 2 == 0
    }

    #[must_use]
    const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Neighbour positions in iteration order, ignoring grid bounds.
    #[must_use]
    pub fn raw_neighbors(self) -> [HexCoord; 6] {
        let table = if self.is_even_column() {
            &ADJACENT_EVEN
        } else {
            &ADJACENT_ODD
        };
        table.map(|delta| self.offset(delta))
    }

    /// The neighbour across river edge `edge`, ignoring grid bounds.
    #[must_use]
    pub fn across_edge(self, edge: u8) -> Option<HexCoord> {
        edge_table(self).get(usize::from(edge)).map(|&delta| self.offset(delta))
    }

    /// Edge index of `self` facing `other`, if the two are adjacent.
    #[must_use]
    pub fn edge_towards(self, other: HexCoord) -> Option<u8> {
        let delta = (other.x - self.x, other.y - self.y);
        edge_table(self)
            .iter()
            .position(|&d| d == delta)
            .map(|i| i as u8)
    }

    /// Whether `self` stores a shared edge with `other` (lexicographically smaller).
    #[must_use]
    pub fn is_canonical_owner(self, other: HexCoord) -> bool {
        (self.x, self.y) < (other.x, other.y)
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

const ADJACENT_EVEN: [(i32, i32); 6] = [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)];
const ADJACENT_ODD: [(i32, i32); 6] = [(0, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)];

const EDGE_EVEN: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
const EDGE_ODD: [(i32, i32); 6] = [(1, 1), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, 0)];

fn edge_table(coord: HexCoord) -> &'static [(i32, i32); 6] {
    if coord.is_even_column() {
        &EDGE_EVEN
    } else {
        &EDGE_ODD
    }
}

/// The same physical side seen from the neighbouring hex.
#[must_use]
pub const fn opposite_edge(edge: u8) -> u8 {
    (edge + 3) % 6
}

/// Grid extent with the staggered-last-row rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: i32,
    pub cols: i32,
}

impl GridDims {
    #[must_use]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Whether `coord` is a cell: inside rows/cols and not an odd column of the last row.
    #[must_use]
    pub const fn contains(self, coord: HexCoord) -> bool {
        coord.x >= 0
            && coord.x < self.cols
            && coord.y >= 0
            && coord.y < self.rows
            && !(coord.y == self.rows - 1 && coord.x % 2 == 1)
    }

    /// Number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        if self.rows <= 0 || self.cols <= 0 {
            return 0;
        }
        ((self.rows - 1) * self.cols + (self.cols + 1) / 2) as usize
    }

    /// Position of a cell in row-major storage.
    #[must_use]
    pub const fn index_of(self, coord: HexCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let index = if coord.y == self.rows - 1 {
            coord.y * self.cols + coord.x / 2
        } else {
            coord.y * self.cols + coord.x
        };
        Some(index as usize)
    }

    /// All cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = HexCoord> {
        (0..self.rows)
            .flat_map(move |y| (0..self.cols).map(move |x| HexCoord::new(x, y)))
            .filter(move |&c| self.contains(c))
    }

    /// In-bounds neighbours of `coord` in iteration order.
    #[must_use]
    pub fn neighbors(self, coord: HexCoord) -> SmallVec<[HexCoord; 6]> {
        coord
            .raw_neighbors()
            .into_iter()
            .filter(|&c| self.contains(c))
            .collect()
    }
}

/// A river edge index outside 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("river edge index {0} out of range 0..=5")]
pub struct InvalidEdgeIndex(pub u8);

/// The set of river edges stored on one hex.
///
/// Serialized as a list of edge indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct RiverEdges(u8);

impl RiverEdges {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn contains(self, edge: u8) -> bool {
        edge < 6 && self.0 & (1 << edge) != 0
    }

    pub fn insert(&mut self, edge: u8) {
        if edge < 6 {
            self.0 |= 1 << edge;
        }
    }

    pub fn remove(&mut self, edge: u8) {
        if edge < 6 {
            self.0 &= !(1 << edge);
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Stored edges in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..6u8).filter(move |&e| self.contains(e))
    }
}

impl TryFrom<Vec<u8>> for RiverEdges {
    type Error = InvalidEdgeIndex;

    fn try_from(edges: Vec<u8>) -> Result<Self, Self::Error> {
        let mut set = RiverEdges::empty();
        for edge in edges {
            if edge >= 6 {
                return Err(InvalidEdgeIndex(edge));
            }
            set.insert(edge);
        }
        Ok(set)
    }
}

impl From<RiverEdges> for Vec<u8> {
    fn from(edges: RiverEdges) -> Self {
        edges.iter().collect()
    }
}
