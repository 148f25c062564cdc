//! # hexwar-engine
//!
//! Rules engine for a two-player, turn-based hex wargame.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every die roll comes from one seeded `GameRng`.
//!    The same seed and the same intents replay to the same outcome.
//!
//! 2. **Intents, not commands**: Players send clicks and end-phase requests.
//!    The engine decides what they mean in the current phase; illegal input
//!    is ignored, never an error.
//!
//! 3. **Events out**: Renderers subscribe to `GameEvent`s and never get
//!    called by the engine directly.
//!
//! ## Architecture
//!
//! - **Single source of truth**: The grid owns every unit; a unit's position
//!   is derived from hex occupancy.
//!
//! - **Special phases**: Multi-step combat consequences (attacker damage
//!   assignment, advance after combat) sit in a FIFO queue that overrides
//!   normal phase input while non-empty.
//!
//! - **Deferred moves**: A validated move waits for `complete_move` so an
//!   external animation can play first.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, intents, phases, game state
//! - `units`: Unit types, stat lines and runtime units
//! - `rules`: Terrain table and the combat results table
//! - `grid`: Hex coordinates, cells, grid model, movement search
//! - `events`: Domain events and the event bus
//! - `engine`: Intent handling, combat, phase state machine
//! - `snapshot`: Scenario maps and save data
//! - `error`: Load and editing errors

pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod rules;
pub mod snapshot;
pub mod units;

// Re-export commonly used types
pub use crate::core::{
    CombatResult, EngineConfig, GameRng, GameRngState, GameState, GameStatus, Intent,
    MoveCompletion, Player, SpecialPhase, SpecialPhaseQueue, TurnPhase,
};

pub use crate::units::{HealthStatus, Unit, UnitId, UnitProperties, UnitType};

pub use crate::rules::{
    AttackModifier, CrtCode, CrtEffect, CrtRow, Terrain, TerrainProperties,
    COMBAT_RESULTS_TABLE, MAX_MOVEMENT_COST,
};

pub use crate::grid::{GridModel, Hex, HexCoord, Reachable, RiverEdges};

pub use crate::events::{EventBus, EventKind, GameEvent, SubscriptionId};

pub use crate::engine::{compute_odds, CombatOdds, GameEngine, PendingMove};

pub use crate::snapshot::{MapHex, SaveData, Scenario};

pub use crate::error::{GridError, LoadError};
