//! Core session types: players, RNG, configuration, intents, phases, state.
//!
//! These are the building blocks the grid and engine share. None of them
//! know about rendering; they are plain data with small invariant-keeping
//! methods.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod phase;
pub mod state;

pub use player::Player;
pub use rng::{GameRng, GameRngState};
pub use config::{EngineConfig, MoveCompletion};
pub use action::Intent;
pub use phase::{GameStatus, SpecialPhase, SpecialPhaseQueue, TurnPhase};
pub use state::{CombatResult, GameState};
