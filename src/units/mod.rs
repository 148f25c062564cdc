//! Unit system: type statistics and runtime instances.
//!
//! ## Key Types
//!
//! - `UnitType`: Infantry, Tank (Artillery defined but inactive)
//! - `UnitProperties`: Static stat line per type
//! - `Unit`: Runtime state (health, per-turn flags)
//! - `UnitId`: Stable identifier, also used by the grid's occupancy index

pub mod definition;
pub mod instance;

pub use definition::{UnitProperties, UnitType};
pub use instance::{HealthStatus, Unit, UnitId};
