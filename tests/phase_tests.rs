//! Phase state machine integration tests.
//!
//! Turn order, event ordering, editor gating and the terminal state.

use std::cell::RefCell;
use std::rc::Rc;

use hexwar_engine::core::{
    EngineConfig, GameStatus, Intent, MoveCompletion, Player, SpecialPhase, TurnPhase,
};
use hexwar_engine::events::{EventKind, GameEvent};
use hexwar_engine::grid::{GridModel, HexCoord};
use hexwar_engine::units::{UnitId, UnitType};
use hexwar_engine::GameEngine;

fn c(x: i32, y: i32) -> HexCoord {
    HexCoord::new(x, y)
}

fn config() -> EngineConfig {
    EngineConfig::new()
        .with_seed(7)
        .with_move_completion(MoveCompletion::Immediate)
}

/// One unit per side, far apart.
fn two_units() -> (GameEngine, UnitId, UnitId) {
    let mut grid = GridModel::new(6, 6);
    let grey = grid.place_unit(c(0, 0), UnitType::Tank, Player::Grey).unwrap();
    let green = grid.place_unit(c(5, 4), UnitType::Infantry, Player::Green).unwrap();
    (GameEngine::new(grid, config()), grey, green)
}

fn record_kinds(engine: &mut GameEngine) -> Rc<RefCell<Vec<EventKind>>> {
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&kinds);
    engine.subscribe_all(move |event| log.borrow_mut().push(event.kind()));
    kinds
}

// =============================================================================
// Turn order
// =============================================================================

#[test]
fn test_new_game_starts_with_grey_move() {
    let (engine, _, _) = two_units();
    let state = engine.state();

    assert_eq!(state.status, GameStatus::GameOn);
    assert_eq!(state.active_player, Player::Grey);
    assert_eq!(state.current_turn_phase, TurnPhase::Move);
    assert!(state.special_phases.is_empty());
    assert!(state.winner.is_none());
}

#[test]
fn test_first_player_from_config() {
    let mut grid = GridModel::new(6, 6);
    grid.place_unit(c(0, 0), UnitType::Tank, Player::Grey).unwrap();
    grid.place_unit(c(5, 4), UnitType::Tank, Player::Green).unwrap();
    let engine = GameEngine::new(grid, config().with_first_player(Player::Green));

    assert_eq!(engine.state().active_player, Player::Green);
}

#[test]
fn test_move_to_attack_keeps_player() {
    let (mut engine, _, _) = two_units();

    engine.dispatch(Intent::EndPhase);

    assert_eq!(engine.state().active_player, Player::Grey);
    assert_eq!(engine.state().current_turn_phase, TurnPhase::Attack);
}

#[test]
fn test_attack_end_passes_the_turn() {
    let (mut engine, grey, _) = two_units();
    engine.dispatch(Intent::UnitClicked(grey));
    engine.dispatch(Intent::HexClicked(c(1, 0)));
    assert!(engine.grid().unit(grey).unwrap().moved);

    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::EndPhase);

    let state = engine.state();
    assert_eq!(state.active_player, Player::Green);
    assert_eq!(state.current_turn_phase, TurnPhase::Move);
    assert!(state.combat_result.is_none());
    assert!(!engine.grid().unit(grey).unwrap().moved);
}

#[test]
fn test_full_round_returns_to_grey() {
    let (mut engine, _, _) = two_units();

    for _ in 0..4 {
        engine.dispatch(Intent::EndPhase);
    }

    assert_eq!(engine.state().active_player, Player::Grey);
    assert_eq!(engine.state().current_turn_phase, TurnPhase::Move);
}

#[test]
fn test_end_phase_clears_selection() {
    let (mut engine, grey, _) = two_units();
    engine.dispatch(Intent::UnitClicked(grey));
    assert_eq!(engine.state().selected_units, vec![grey]);

    engine.dispatch(Intent::EndPhase);

    assert!(engine.state().selected_units.is_empty());
}

#[test]
fn test_green_moves_on_own_turn() {
    let (mut engine, _, green) = two_units();
    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::EndPhase);

    engine.dispatch(Intent::UnitClicked(green));
    engine.dispatch(Intent::HexClicked(c(4, 4)));

    assert_eq!(engine.grid().unit_position(green), Some(c(4, 4)));
}

// =============================================================================
// Attack-phase selection
// =============================================================================

#[test]
fn test_attack_phase_multi_select_toggles() {
    let mut grid = GridModel::new(6, 6);
    let a = grid.place_unit(c(0, 0), UnitType::Tank, Player::Grey).unwrap();
    let b = grid.place_unit(c(2, 0), UnitType::Infantry, Player::Grey).unwrap();
    grid.place_unit(c(5, 4), UnitType::Infantry, Player::Green).unwrap();
    let mut engine = GameEngine::new(grid, config());
    engine.dispatch(Intent::EndPhase);

    engine.dispatch(Intent::UnitClicked(a));
    engine.dispatch(Intent::UnitClicked(b));
    assert_eq!(engine.state().selected_units, vec![a, b]);

    engine.dispatch(Intent::UnitClicked(a));
    assert_eq!(engine.state().selected_units, vec![b]);
}

#[test]
fn test_hex_click_without_enemy_does_nothing_in_attack() {
    let (mut engine, grey, _) = two_units();
    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::UnitClicked(grey));

    engine.dispatch(Intent::HexClicked(c(1, 0)));

    assert_eq!(engine.grid().unit_position(grey), Some(c(0, 0)));
    assert_eq!(engine.state().selected_units, vec![grey]);
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn test_turn_change_event_order() {
    let (mut engine, _, _) = two_units();
    engine.dispatch(Intent::EndPhase);
    let kinds = record_kinds(&mut engine);

    engine.dispatch(Intent::EndPhase);

    assert_eq!(
        *kinds.borrow(),
        vec![
            EventKind::CombatResultUpdated,
            EventKind::PhaseChanged,
            EventKind::SelectionChanged,
        ]
    );
}

#[test]
fn test_phase_changed_payload() {
    let (mut engine, _, _) = two_units();
    let phases = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&phases);
    engine.subscribe(EventKind::PhaseChanged, move |event| {
        if let GameEvent::PhaseChanged { active_player, phase } = event {
            log.borrow_mut().push((*active_player, *phase));
        }
    });

    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::EndPhase);

    assert_eq!(
        *phases.borrow(),
        vec![(Player::Grey, TurnPhase::Attack), (Player::Green, TurnPhase::Move)]
    );
}

#[test]
fn test_unsubscribed_handler_stops_receiving() {
    let (mut engine, _, _) = two_units();
    let count = Rc::new(RefCell::new(0));
    let log = Rc::clone(&count);
    let id = engine.subscribe(EventKind::PhaseChanged, move |_| *log.borrow_mut() += 1);

    engine.dispatch(Intent::EndPhase);
    assert!(engine.events_mut().unsubscribe(id));
    engine.dispatch(Intent::EndPhase);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_ignored_intent_publishes_nothing() {
    let (mut engine, _, green) = two_units();
    let kinds = record_kinds(&mut engine);

    engine.dispatch(Intent::UnitClicked(green));
    engine.dispatch(Intent::HexClicked(c(3, 3)));
    engine.dispatch(Intent::HexClicked(c(-1, 0)));

    assert!(kinds.borrow().is_empty());
}

// =============================================================================
// Editor and terminal status
// =============================================================================

#[test]
fn test_editor_ignores_intents_until_started() {
    let mut engine = GameEngine::editor(GridModel::new(6, 6), config());
    assert_eq!(engine.state().status, GameStatus::Editor);

    let grid = engine.edit_grid().unwrap();
    let grey = grid.place_unit(c(0, 0), UnitType::Tank, Player::Grey).unwrap();
    grid.place_unit(c(5, 4), UnitType::Infantry, Player::Green).unwrap();

    engine.dispatch(Intent::UnitClicked(grey));
    engine.dispatch(Intent::EndPhase);
    assert!(engine.state().selected_units.is_empty());
    assert_eq!(engine.state().current_turn_phase, TurnPhase::Move);

    let kinds = record_kinds(&mut engine);
    assert!(engine.start_game());
    assert_eq!(engine.state().status, GameStatus::GameOn);
    assert_eq!(*kinds.borrow(), vec![EventKind::PhaseChanged]);

    // no more editing, no second start
    assert!(engine.edit_grid().is_none());
    assert!(!engine.start_game());

    engine.dispatch(Intent::UnitClicked(grey));
    assert_eq!(engine.state().selected_units, vec![grey]);
}

#[test]
fn test_start_game_without_opponent_ends_at_once() {
    let mut engine = GameEngine::editor(GridModel::new(6, 6), config());
    engine
        .edit_grid()
        .unwrap()
        .place_unit(c(0, 0), UnitType::Tank, Player::Grey)
        .unwrap();

    engine.start_game();

    assert_eq!(engine.state().status, GameStatus::Ended);
    assert_eq!(engine.state().winner, Some(Player::Grey));
}

#[test]
fn test_ended_game_ignores_every_intent() {
    let mut grid = GridModel::new(6, 6);
    grid.set_flag(c(1, 0), Some(Player::Green)).unwrap();
    let grey = grid.place_unit(c(0, 0), UnitType::Tank, Player::Grey).unwrap();
    grid.place_unit(c(5, 4), UnitType::Infantry, Player::Green).unwrap();
    let mut engine = GameEngine::new(grid, config());

    engine.dispatch(Intent::UnitClicked(grey));
    engine.dispatch(Intent::HexClicked(c(1, 0)));
    assert_eq!(engine.state().status, GameStatus::Ended);

    let before = engine.state().clone();
    let kinds = record_kinds(&mut engine);
    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::UnitClicked(grey));
    engine.dispatch(Intent::HexClicked(c(2, 0)));

    assert_eq!(*engine.state(), before);
    assert!(kinds.borrow().is_empty());
}

// =============================================================================
// Special-phase gating
// =============================================================================

#[test]
fn test_end_phase_during_advance_pops_only_advance() {
    let mut grid = GridModel::new(6, 6);
    let t1 = grid.place_unit(c(2, 1), UnitType::Tank, Player::Grey).unwrap();
    let t2 = grid.place_unit(c(3, 2), UnitType::Tank, Player::Grey).unwrap();
    let defender = grid.place_unit(c(2, 2), UnitType::Infantry, Player::Green).unwrap();
    grid.unit_mut(defender).unwrap().take_step_loss();
    grid.place_unit(c(5, 4), UnitType::Infantry, Player::Green).unwrap();
    let mut engine = GameEngine::new(grid, config());

    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::UnitClicked(t1));
    engine.dispatch(Intent::UnitClicked(t2));
    engine.dispatch(Intent::UnitClicked(defender));
    assert_eq!(engine.state().current_special_phase(), Some(SpecialPhase::Advance));

    let kinds = record_kinds(&mut engine);
    engine.dispatch(Intent::EndPhase);

    let state = engine.state();
    assert!(state.special_phases.is_empty());
    assert!(state.vacated_hex.is_none());
    assert_eq!(state.current_turn_phase, TurnPhase::Attack);
    assert_eq!(state.active_player, Player::Grey);
    assert!(engine.grid().highlighted().is_empty());
    assert!(!kinds.borrow().contains(&EventKind::PhaseChanged));

    // the next request ends the attack phase as usual
    engine.dispatch(Intent::EndPhase);
    assert_eq!(engine.state().active_player, Player::Green);
}

#[test]
fn test_only_attackers_selectable_during_advance() {
    let mut grid = GridModel::new(6, 6);
    let t1 = grid.place_unit(c(2, 1), UnitType::Tank, Player::Grey).unwrap();
    let t2 = grid.place_unit(c(3, 2), UnitType::Tank, Player::Grey).unwrap();
    let bystander = grid.place_unit(c(0, 4), UnitType::Infantry, Player::Grey).unwrap();
    let defender = grid.place_unit(c(2, 2), UnitType::Infantry, Player::Green).unwrap();
    grid.unit_mut(defender).unwrap().take_step_loss();
    grid.place_unit(c(5, 4), UnitType::Infantry, Player::Green).unwrap();
    let mut engine = GameEngine::new(grid, config());

    engine.dispatch(Intent::EndPhase);
    engine.dispatch(Intent::UnitClicked(t1));
    engine.dispatch(Intent::UnitClicked(t2));
    engine.dispatch(Intent::UnitClicked(defender));

    // only attackers may be picked for the advance
    engine.dispatch(Intent::UnitClicked(bystander));
    assert!(engine.state().selected_units.is_empty());

    engine.dispatch(Intent::UnitClicked(t1));
    assert_eq!(engine.state().selected_units, vec![t1]);
    engine.dispatch(Intent::UnitClicked(t2));
    assert_eq!(engine.state().selected_units, vec![t1]);
}
