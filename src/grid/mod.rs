//! Hex grid: coordinates, cells, the grid model and movement search.
//!
//! ## Key Types
//!
//! - `HexCoord`: Offset coordinate with parity-dependent neighbour tables
//! - `Hex`: One cell (terrain, occupant, flag, river edges, highlight)
//! - `GridModel`: Owner of all cells and units
//! - `Reachable`: Result of a movement search, with path reconstruction

pub mod coord;
pub mod hex;
pub mod model;
pub mod movement;

pub use coord::{opposite_edge, GridDims, HexCoord, InvalidEdgeIndex, RiverEdges};
pub use hex::Hex;
pub use model::GridModel;
pub use movement::Reachable;
