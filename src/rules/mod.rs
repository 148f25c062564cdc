//! Static rule tables: terrain properties and the combat results table.
//!
//! Pure data plus lookup helpers. Unit statistics live next to the unit
//! type in `crate::units`.

pub mod terrain;
pub mod crt;

pub use terrain::{AttackModifier, Terrain, TerrainProperties, MAX_MOVEMENT_COST};
pub use crt::{select_row, shift_row, CrtCode, CrtEffect, CrtRow, COMBAT_RESULTS_TABLE};
