//! The game engine: intent handling on top of `GameState` and `GridModel`.
//!
//! `GameEngine` is the single owner of a session's mutable state and the
//! only component that changes movement and combat outcomes. Every intent
//! runs to completion before the call returns, including movement search,
//! combat resolution and any cascade of special-phase transitions.
//!
//! ## Intent gating
//!
//! An intent is ignored (logged at debug level, no state change, no event)
//! when the status is not GAMEON, while a move is waiting for its
//! completion signal, or when the current phase does not allow it.
//!
//! ## Submodules
//!
//! - `combat`: odds computation and attack resolution
//! - `moves`: move validation and the deferred-move hand-off
//! - `phase`: end-phase requests and the special-phase queue

pub mod combat;
mod moves;
mod phase;

use tracing::{debug, info};

use crate::core::{EngineConfig, GameRng, GameState, GameStatus, Intent, SpecialPhase, TurnPhase};
use crate::events::{EventBus, EventKind, GameEvent, SubscriptionId};
use crate::grid::{GridModel, HexCoord};
use crate::units::UnitId;

pub use combat::{compute_odds, CombatOdds};

/// A validated move waiting for `complete_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMove {
    pub unit: UnitId,
    pub destination: HexCoord,
    /// The move is an advance after combat.
    pub advance: bool,
}

/// Orchestrates player intents for one session.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    grid: GridModel,
    events: EventBus,
    rng: GameRng,
    config: EngineConfig,
    pending_move: Option<PendingMove>,
}

impl GameEngine {
    /// Start a game on `grid`, with the first player from `config` to move.
    #[must_use]
    pub fn new(grid: GridModel, config: EngineConfig) -> Self {
        let state = GameState::new_game(config.first_player);
        let rng = GameRng::new(config.seed);
        Self::from_parts(state, grid, rng, config)
    }

    /// Open `grid` in EDITOR status. Call `start_game` to play.
    #[must_use]
    pub fn editor(grid: GridModel, config: EngineConfig) -> Self {
        let state = GameState {
            active_player: config.first_player,
            ..GameState::new()
        };
        let rng = GameRng::new(config.seed);
        Self::from_parts(state, grid, rng, config)
    }

    /// Assemble an engine from already-validated parts.
    #[must_use]
    pub fn from_parts(state: GameState, grid: GridModel, rng: GameRng, config: EngineConfig) -> Self {
        Self {
            state,
            grid,
            events: EventBus::new(),
            rng,
            config,
            pending_move: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Shorthand for `events_mut().subscribe`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    /// Shorthand for `events_mut().subscribe_all`.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe_all(handler)
    }

    /// Whether a move is waiting for `complete_move`.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pending_move.is_some()
    }

    #[must_use]
    pub fn pending_move(&self) -> Option<PendingMove> {
        self.pending_move
    }

    // === Editor ===

    /// Mutable grid access, only while in EDITOR status.
    pub fn edit_grid(&mut self) -> Option<&mut GridModel> {
        (self.state.status == GameStatus::Editor).then_some(&mut self.grid)
    }

    /// Leave EDITOR status and start play. Returns false if not in EDITOR.
    pub fn start_game(&mut self) -> bool {
        if self.state.status != GameStatus::Editor {
            return false;
        }
        self.grid.clear_highlights();
        self.state.status = GameStatus::GameOn;
        info!(first_player = %self.state.active_player, "game started");
        self.publish_phase_changed();
        self.check_winning_conditions();
        true
    }

    // === Intents ===

    /// Apply one player intent.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::UnitClicked(unit) => self.handle_unit_click(unit),
            Intent::HexClicked(coord) => self.handle_hex_click(coord),
            Intent::EndPhase => self.end_current_phase(),
        }
    }

    fn accepts_intents(&self) -> Result<(), &'static str> {
        if !self.state.is_game_on() {
            return Err("game is not on");
        }
        if self.is_animating() {
            return Err("move in progress");
        }
        Ok(())
    }

    /// A unit was clicked.
    pub fn handle_unit_click(&mut self, id: UnitId) {
        if let Err(reason) = self.accepts_intents() {
            debug!(unit = %id, reason, "unit click ignored");
            return;
        }
        let Some(unit) = self.grid.unit(id) else {
            debug!(unit = %id, reason = "unknown unit", "unit click ignored");
            return;
        };
        let (owner, moved) = (unit.player, unit.moved);

        let special = self.state.current_special_phase();
        let is_attacker = self.state.attackers.contains(&id);
        let selection_free =
            self.state.selected_units.is_empty() || self.state.selected_units[0] == id;

        match (special, self.state.current_turn_phase) {
            (Some(SpecialPhase::AttackerDamage), _) if is_attacker => self.assign_attacker_damage(id),
            (Some(SpecialPhase::Advance), _) if is_attacker && selection_free => {
                self.select(Some(id), false);
            }
            (None, TurnPhase::Attack) => self.attack_phase_selection(id),
            (None, TurnPhase::Move)
                if selection_free && owner == self.state.active_player && !moved =>
            {
                self.select(Some(id), false);
            }
            _ => debug!(unit = %id, ?special, reason = "not selectable now", "unit click ignored"),
        }
    }

    fn attack_phase_selection(&mut self, id: UnitId) {
        let Some(unit) = self.grid.unit(id) else {
            return;
        };
        if unit.player == self.state.active_player {
            if unit.attacked {
                debug!(unit = %id, reason = "already attacked", "unit click ignored");
            } else {
                self.select(Some(id), true);
            }
            return;
        }
        self.attack_with_selection(id);
    }

    /// A hex was clicked.
    pub fn handle_hex_click(&mut self, coord: HexCoord) {
        if let Err(reason) = self.accepts_intents() {
            debug!(%coord, reason, "hex click ignored");
            return;
        }
        if !self.grid.contains(coord) {
            debug!(%coord, reason = "outside grid", "hex click ignored");
            return;
        }

        match (self.state.current_special_phase(), self.state.current_turn_phase) {
            (Some(SpecialPhase::Advance), _) => self.try_advance(coord),
            (None, TurnPhase::Move) => self.try_move(coord),
            (None, TurnPhase::Attack) => match self.grid.unit_at(coord) {
                Some(unit) if unit.player != self.state.active_player => {
                    let defender = unit.id;
                    self.attack_with_selection(defender);
                }
                _ => debug!(%coord, reason = "no enemy unit", "hex click ignored"),
            },
            (Some(special), _) => {
                debug!(%coord, ?special, reason = "special phase active", "hex click ignored");
            }
        }
    }

    // === Shared helpers ===

    fn publish(&mut self, event: GameEvent) {
        self.events.publish(&event);
    }

    fn select(&mut self, unit: Option<UnitId>, multi_select: bool) {
        self.state.select_unit(unit, multi_select);
        let selected = self.state.selected_units.clone();
        self.publish(GameEvent::SelectionChanged { selected });
    }

    fn publish_unit_updated(&mut self, id: UnitId) {
        if let Some(unit) = self.grid.unit(id).cloned() {
            self.publish(GameEvent::UnitUpdated { unit });
        }
    }

    fn publish_phase_changed(&mut self) {
        self.publish(GameEvent::PhaseChanged {
            active_player: self.state.active_player,
            phase: self.state.current_turn_phase,
        });
    }

    /// Remove every DEAD unit, dropping it from selection and attackers.
    fn remove_dead_units(&mut self) {
        for unit in self.grid.remove_dead_units() {
            self.state.forget_unit(unit.id);
            debug!(unit = %unit.id, player = %unit.player, "unit removed");
            self.publish(GameEvent::UnitRemoved { unit });
        }
    }

    /// End the game if a win condition holds.
    fn check_winning_conditions(&mut self) {
        if self.state.status != GameStatus::GameOn {
            return;
        }
        if let Some(winner) = self.grid.winner() {
            self.state.set_winner(winner);
            info!(%winner, "winner declared");
            self.publish(GameEvent::WinnerUpdated { winner: Some(winner) });
        }
    }
}
