//! A single map cell.

use serde::{Deserialize, Serialize};

use super::coord::{HexCoord, RiverEdges};
use crate::core::Player;
use crate::rules::Terrain;
use crate::units::UnitId;

/// One cell of the grid.
///
/// `unit` is the grid's occupancy index: the unit itself lives in the grid's
/// unit list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hex {
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub(crate) unit: Option<UnitId>,
    /// Flag owner, if this is a flag hex.
    pub flag: Option<Player>,
    /// River edges stored on this side (see `GridModel::toggle_river`).
    pub(crate) river_edges: RiverEdges,
    /// Transient UI hint.
    pub highlighted: bool,
}

impl Hex {
    #[must_use]
    pub fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            terrain: Terrain::Clear,
            unit: None,
            flag: None,
            river_edges: RiverEdges::empty(),
            highlighted: false,
        }
    }

    #[must_use]
    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    #[must_use]
    pub fn river_edges(&self) -> RiverEdges {
        self.river_edges
    }

    /// False when the hex has blocking terrain, a unit or a flag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.terrain.is_blocking() && self.unit.is_none() && self.flag.is_none()
    }
}
