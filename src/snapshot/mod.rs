//! Plain-data snapshots: scenario maps and saved sessions.
//!
//! Both are serde types; reading and writing files is the caller's job.
//! Loading validates the data up front and builds fresh grid and state.

pub mod save;
pub mod scenario;

pub use save::{SaveData, SavedGameState, SavedHex, SavedUnit};
pub use scenario::{MapHex, Scenario};
