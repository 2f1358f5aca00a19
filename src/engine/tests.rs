use crate::error::GameError;
use crate::types::{
    CellView, Direction, MoveResult, Occupant, Outcome, Strategy, Tile, TurnPhase, Vec2,
};

use super::{EngineOptions, TurnEngine};

fn new_engine(rows: &[&str]) -> TurnEngine {
    TurnEngine::from_level(rows, EngineOptions::default()).expect("level should parse")
}

fn play_turn(engine: &mut TurnEngine, dir: Direction) -> Option<Outcome> {
    let moved = engine
        .apply_seeker_move(dir)
        .expect("session should be running");
    assert!(
        matches!(moved, MoveResult::Moved(_)),
        "move {dir:?} was {moved:?}"
    );
    engine
        .advance_chasers(Strategy::GreedyBestFirst)
        .expect("session should be running")
}

#[test]
fn blocked_move_keeps_position_and_phase() {
    let mut engine = new_engine(&["#####", "#P  #", "#####"]);

    let result = engine.apply_seeker_move(Direction::Up).unwrap();
    assert_eq!(result, MoveResult::Blocked);
    assert_eq!(engine.state().seeker(), Vec2::new(1, 1));
    assert_eq!(engine.state().phase(), TurnPhase::SeekerTurn);

    let mut edge = new_engine(&["P  "]);
    assert_eq!(
        edge.apply_seeker_move(Direction::Left).unwrap(),
        MoveResult::Blocked
    );
    assert_eq!(
        edge.apply_seeker_move(Direction::Up).unwrap(),
        MoveResult::Blocked
    );
    assert_eq!(edge.state().seeker(), Vec2::new(0, 0));
    assert_eq!(edge.state().phase(), TurnPhase::SeekerTurn);
    assert_eq!(edge.state().seeker_moves(), 0);
}

#[test]
fn successful_move_hands_turn_to_chasers() {
    let mut engine = new_engine(&["#####", "#P  #", "#####"]);

    let result = engine.apply_seeker_move(Direction::Right).unwrap();
    assert_eq!(result, MoveResult::Moved(Vec2::new(2, 1)));
    assert_eq!(engine.state().phase(), TurnPhase::ChaserTurn);
    assert_eq!(engine.state().grid().count_occupants(Occupant::Seeker), 1);
    assert_eq!(
        engine.state().cell_view(Vec2::new(2, 1)),
        Some(CellView::SeekerOccupied)
    );
    assert_eq!(
        engine.state().cell_view(Vec2::new(1, 1)),
        Some(CellView::Floor)
    );
}

#[test]
fn seeker_cannot_move_twice_in_a_row() {
    let mut engine = new_engine(&["#####", "#P  #", "#####"]);
    engine.apply_seeker_move(Direction::Right).unwrap();

    let second = engine.apply_seeker_move(Direction::Right).unwrap();
    assert_eq!(second, MoveResult::NotYourTurn);
    assert_eq!(engine.state().seeker(), Vec2::new(2, 1));
}

#[test]
fn advancing_chasers_on_seeker_turn_is_a_no_op() {
    let mut engine = new_engine(&["#######", "#P   G#", "#######"]);

    for _ in 0..3 {
        let result = engine.advance_chasers(Strategy::GreedyBestFirst).unwrap();
        assert_eq!(result, None);
    }
    assert_eq!(engine.state().chasers(), &[Vec2::new(5, 1)]);
    assert_eq!(engine.state().phase(), TurnPhase::SeekerTurn);
    assert_eq!(engine.state().turn(), 0);
}

#[test]
fn invalid_direction_token_does_not_mutate() {
    let mut engine = new_engine(&["#####", "#P  #", "#####"]);

    let err = engine.apply_seeker_token("jump").unwrap_err();
    assert!(matches!(err, GameError::InvalidDirection(_)));
    assert_eq!(engine.state().seeker(), Vec2::new(1, 1));
    assert_eq!(engine.state().phase(), TurnPhase::SeekerTurn);

    let moved = engine.apply_seeker_token("D").unwrap();
    assert_eq!(moved, MoveResult::Moved(Vec2::new(2, 1)));
}

#[test]
fn unknown_strategy_name_does_not_mutate() {
    let mut engine = new_engine(&["#######", "#P   G#", "#######"]);
    engine.apply_seeker_move(Direction::Right).unwrap();

    let err = engine.advance_chasers_named("teleport").unwrap_err();
    assert!(matches!(err, GameError::UnknownStrategy(_)));
    assert_eq!(engine.state().phase(), TurnPhase::ChaserTurn);
    assert_eq!(engine.state().chasers(), &[Vec2::new(5, 1)]);

    let outcome = engine.advance_chasers_named("dfs").unwrap();
    assert_eq!(outcome, Some(Outcome::Continue));
    assert_eq!(engine.state().chasers(), &[Vec2::new(4, 1)]);
}

#[test]
fn default_pass_uses_configured_strategy() {
    let options = EngineOptions {
        strategy: Strategy::DepthFirst,
        ..EngineOptions::default()
    };
    // The seeker ends up straight above the chaser. Depth-first pops Right
    // first and circles the grid, so the chaser steps sideways.
    let rows = ["P  ", " G ", "   "];
    let mut dfs = TurnEngine::from_level(&rows, options).unwrap();
    dfs.apply_seeker_move(Direction::Right).unwrap();
    assert_eq!(dfs.advance_chasers_default().unwrap(), Some(Outcome::Continue));
    assert_eq!(dfs.state().chasers(), &[Vec2::new(2, 1)]);

    let mut greedy = new_engine(&rows);
    greedy.apply_seeker_move(Direction::Right).unwrap();
    assert_eq!(
        greedy.advance_chasers_default().unwrap(),
        Some(Outcome::Captured)
    );
}

#[test]
fn chaser_pass_flips_phase_back_and_counts_turn() {
    let mut engine = new_engine(&["#######", "#P   G#", "#######"]);
    let outcome = play_turn(&mut engine, Direction::Right);

    assert_eq!(outcome, Some(Outcome::Continue));
    assert_eq!(engine.state().phase(), TurnPhase::SeekerTurn);
    assert_eq!(engine.state().chasers(), &[Vec2::new(4, 1)]);
    assert_eq!(engine.state().turn(), 1);
}

#[test]
fn chasers_target_the_seekers_new_cell() {
    // Aiming at the seeker's old cell (3,1) would tie Up and Right and
    // pick Up; the new cell (3,2) is straight to the right.
    let mut engine = new_engine(&["######", "#  P #", "#G   #", "######"]);
    play_turn(&mut engine, Direction::Down);
    assert_eq!(engine.state().chasers(), &[Vec2::new(2, 2)]);
}

#[test]
fn chasers_move_in_index_order() {
    let mut engine = new_engine(&["#########", "#P    GG#", "#########"]);
    play_turn(&mut engine, Direction::Right);
    assert_eq!(
        engine.state().chasers(),
        &[Vec2::new(5, 1), Vec2::new(6, 1)]
    );

    play_turn(&mut engine, Direction::Left);
    play_turn(&mut engine, Direction::Right);
    assert_eq!(
        engine.state().chasers(),
        &[Vec2::new(3, 1), Vec2::new(4, 1)]
    );
    assert_eq!(engine.state().grid().count_occupants(Occupant::Chaser(0)), 1);
    assert_eq!(engine.state().grid().count_occupants(Occupant::Chaser(1)), 1);
}

#[test]
fn walled_off_chaser_stalls() {
    let mut engine = new_engine(&["######", "#P #G#", "#  ###", "######"]);
    let outcome = play_turn(&mut engine, Direction::Down);
    assert_eq!(outcome, Some(Outcome::Continue));
    assert_eq!(engine.state().chasers(), &[Vec2::new(4, 1)]);
}

#[test]
fn chaser_walking_over_item_leaves_it_in_place() {
    let mut engine = new_engine(&["######", "#P $G#", "#    #", "######"]);
    play_turn(&mut engine, Direction::Down);

    let item = Vec2::new(3, 1);
    assert_eq!(engine.state().chasers(), &[item]);
    assert_eq!(
        engine.state().cell_view(item),
        Some(CellView::ChaserOccupied)
    );
    assert_eq!(engine.state().grid().tile(item), Some(Tile::Item));
    assert_eq!(engine.state().items().remaining, 1);
}

#[test]
fn capture_takes_precedence_over_collecting_last_item() {
    let mut engine = new_engine(&["#####", "#P$G#", "#####"]);
    let outcome = play_turn(&mut engine, Direction::Right);

    assert_eq!(outcome, Some(Outcome::Captured));
    assert_eq!(engine.state().outcome(), Some(Outcome::Captured));
    assert_eq!(engine.state().items().remaining, 1);
    assert_eq!(
        engine.state().grid().tile(Vec2::new(2, 1)),
        Some(Tile::Item)
    );
}

#[test]
fn outcome_query_before_chaser_pass_changes_nothing() {
    let mut engine = new_engine(&["#####", "#P$G#", "#####"]);
    engine.apply_seeker_move(Direction::Right).unwrap();
    let before = engine.state().snapshot();

    assert_eq!(engine.check_outcome(), Outcome::Continue);
    assert_eq!(engine.state().outcome(), None);
    assert_eq!(engine.state().items().remaining, 1);
    assert_eq!(
        engine.state().grid().tile(Vec2::new(2, 1)),
        Some(Tile::Item)
    );
    assert_eq!(engine.state().snapshot().rows, before.rows);
    assert_eq!(engine.state().phase(), TurnPhase::ChaserTurn);

    let outcome = engine.advance_chasers(Strategy::GreedyBestFirst).unwrap();
    assert_eq!(outcome, Some(Outcome::Captured));
    assert_eq!(engine.check_outcome(), Outcome::Captured);
}

#[test]
fn walking_into_a_chaser_is_caught_after_the_pass() {
    let mut engine = new_engine(&["######", "#P  G#", "######"]);
    play_turn(&mut engine, Direction::Right);
    assert_eq!(engine.state().chasers(), &[Vec2::new(3, 1)]);

    let outcome = play_turn(&mut engine, Direction::Right);
    assert_eq!(outcome, Some(Outcome::Captured));
}

#[test]
fn items_are_consumed_once_and_last_one_wins() {
    let mut engine = new_engine(&["######", "#P$ $#", "######"]);
    assert_eq!(engine.state().items().total, 2);

    assert_eq!(play_turn(&mut engine, Direction::Right), Some(Outcome::Continue));
    assert_eq!(engine.state().items().remaining, 1);
    assert_eq!(
        engine.state().grid().tile(Vec2::new(2, 1)),
        Some(Tile::Empty)
    );

    play_turn(&mut engine, Direction::Left);
    assert_eq!(play_turn(&mut engine, Direction::Right), Some(Outcome::Continue));
    assert_eq!(engine.state().items().remaining, 1);

    play_turn(&mut engine, Direction::Right);
    assert_eq!(play_turn(&mut engine, Direction::Right), Some(Outcome::Won));
    assert_eq!(engine.state().items().remaining, 0);
    assert_eq!(engine.state().outcome(), Some(Outcome::Won));
}

#[test]
fn ended_session_rejects_commands_without_mutation() {
    let mut engine = new_engine(&["#####", "#P$ #", "#####"]);
    assert_eq!(play_turn(&mut engine, Direction::Right), Some(Outcome::Won));
    let before = engine.state().snapshot();

    assert!(matches!(
        engine.apply_seeker_move(Direction::Right),
        Err(GameError::SessionEnded)
    ));
    assert!(matches!(
        engine.advance_chasers(Strategy::DepthFirst),
        Err(GameError::SessionEnded)
    ));
    assert_eq!(engine.check_outcome(), Outcome::Won);

    let after = engine.state().snapshot();
    assert_eq!(before.rows, after.rows);
    assert_eq!(before.seeker, after.seeker);
    assert_eq!(before.turn, after.turn);
    assert_eq!(before.items_remaining, after.items_remaining);

    let summary = engine.state().summary().expect("ended session has a summary");
    assert_eq!(summary.outcome, Outcome::Won);
    assert_eq!(summary.turns, 1);
    assert_eq!(summary.seeker_moves, 1);
    assert_eq!(summary.items_collected, 1);
}
