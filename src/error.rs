//! Error types.
//!
//! Player intents never fail: illegal input is ignored. Errors exist only
//! for building a session from external data and for map editing.

use thiserror::Error;

use crate::grid::HexCoord;
use crate::units::UnitType;

/// Map-editing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The coordinate is not a cell of this grid.
    #[error("hex {0} is outside the grid")]
    OutOfBounds(HexCoord),
    /// The target hex already holds a unit.
    #[error("hex {0} is already occupied")]
    Occupied(HexCoord),
    /// No unit with this identity is on the map.
    #[error("unknown unit {0}")]
    UnknownUnit(crate::units::UnitId),
    /// The unit type is defined but not in play.
    #[error("unit type {0} is not active")]
    InactiveUnitType(UnitType),
}

/// Scenario or save data could not be turned into a session.
///
/// Returned before any state is built, so an existing session is never
/// touched by a failed load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },
    #[error("hex {0} is outside the grid")]
    HexOutOfBounds(HexCoord),
    #[error("hex {0} is listed more than once")]
    DuplicateHex(HexCoord),
    #[error("hex {coord} has invalid river edge {edge}")]
    InvalidRiverEdge { coord: HexCoord, edge: u8 },
    #[error("unit at {0} has no owning player")]
    UnitWithoutPlayer(HexCoord),
    #[error("unit type {unit_type} at {coord} is not active")]
    InactiveUnitType { coord: HexCoord, unit_type: UnitType },
    #[error("more than one unit at {0}")]
    DuplicateUnit(HexCoord),
    #[error("no unit at referenced coordinate {0}")]
    UnknownUnitReference(String),
    #[error("malformed coordinate reference {0:?}")]
    MalformedReference(String),
    #[error("inconsistent game state: {0}")]
    InconsistentState(String),
}

impl From<GridError> for LoadError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds(coord) => LoadError::HexOutOfBounds(coord),
            GridError::Occupied(coord) => LoadError::DuplicateUnit(coord),
            GridError::UnknownUnit(id) => LoadError::UnknownUnitReference(id.to_string()),
            GridError::InactiveUnitType(unit_type) => {
                LoadError::InconsistentState(format!("inactive unit type {unit_type}"))
            }
        }
    }
}
