//! Integration tests for the HEXVERSI engine
//!
//! Tests the full stack: geometry, captures, the state machine, strategies,
//! players, configuration and the headless runner

use std::cell::RefCell;
use std::rc::Rc;

use hexversi_core::{
    AiPlayer, AnyOpenCorner, GameResult, GameView, Hex, HumanPlayer, Mark, MatchConfig,
    MatchRunner, MostPointsCaptured, Phase, Player, PlayerKind, Reversi, ReversiError, Strategy,
    TryTwo, Turn,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn started(rows: usize) -> Reversi {
    let mut game = Reversi::new(rows).unwrap();
    game.start().unwrap();
    game
}

fn place(q: i32, r: i32) -> Turn {
    Turn::Place(Hex::new(q, r))
}

/// Corners-first O against greedy X on seven rows, start to finish
fn hard_vs_easy_turns() -> Vec<Turn> {
    vec![
        place(-1, -1),
        place(-1, -2),
        place(-2, 1),
        place(-1, 2),
        place(1, 1),
        place(2, -1),
        place(1, -2),
        place(-3, 1),
        place(-2, 3),
        place(2, -3),
        place(-2, -1),
        place(1, 2),
        place(0, -3),
        place(-1, 3),
        place(0, 3),
        Turn::Pass,
        place(-3, 2),
        place(-3, 3),
        place(3, -2),
        place(3, -1),
        place(3, 0),
        Turn::Pass,
        place(1, -3),
        Turn::Pass,
        place(3, -3),
        Turn::Pass,
        place(2, 1),
        Turn::Pass,
        Turn::Pass,
    ]
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_board_profile_for_many_sizes() {
    for rows in (5..=15).step_by(2) {
        let game = started(rows);
        let board = game.board();
        assert_eq!(board.len(), rows);
        let top = rows.div_ceil(2);
        for row in 0..rows {
            let expected = if row < top { top + row } else { rows - (row + 1 - top) };
            assert_eq!(board[&row].len(), expected, "rows {rows} row {row}");
        }
    }
}

#[test]
fn test_third_coordinate_after_play() {
    let mut game = started(7);
    for turn in hard_vs_easy_turns().into_iter().take(10) {
        game.play(turn).unwrap();
    }
    for cell in game.board().values().flatten() {
        assert_eq!(cell.hex.q + cell.hex.r + cell.hex.s(), 0);
    }
    for cell in game.snapshot().board().values().flatten() {
        assert_eq!(cell.hex.s(), -cell.hex.q - cell.hex.r);
    }
}

#[test]
fn test_find_cell_out_of_bounds() {
    let game = started(5);
    assert_eq!(
        game.find_cell(Hex::new(0, 3)),
        Err(ReversiError::OutOfBounds { q: 0, r: 3 })
    );
    assert_eq!(
        game.is_valid_move(Hex::new(-3, 0)),
        Err(ReversiError::OutOfBounds { q: -3, r: 0 })
    );
}

// ============================================================================
// STATE MACHINE
// ============================================================================

#[test]
fn test_opening_scenario() {
    let mut game = started(7);
    assert_eq!(game.valid_moves().len(), 6);
    assert_eq!(game.current_mark(), Mark::O);

    game.apply_move(Hex::new(-1, -1)).unwrap();
    assert_eq!(game.score(Mark::O), Ok(5));
    assert_eq!(game.score(Mark::X), Ok(2));
    assert_eq!(game.current_mark(), Mark::X);
    assert!(game.find_cell(Hex::new(0, -1)).unwrap().holds(Mark::O));
}

#[test]
fn test_board_is_a_copy() {
    let mut game = started(7);
    let before = game.board();
    game.apply_move(Hex::new(-1, -1)).unwrap();
    let after = game.board();
    assert_ne!(before, after);
    assert!(before.values().flatten().all(|cell| cell.hex != Hex::new(-1, -1) || cell.is_empty()));
}

#[test]
fn test_pass_sequences_end_game() {
    let mut game = started(7);
    game.apply_move(Hex::new(-1, -1)).unwrap();
    game.pass().unwrap();
    game.apply_move(game.valid_moves()[0]).unwrap();
    game.pass().unwrap();
    assert!(!game.is_game_over());
    game.pass().unwrap();
    assert!(game.is_game_over());
    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.pass(), Err(ReversiError::GameOver));
    assert_eq!(game.result(), GameResult::Winner(Mark::O));
}

#[test]
fn test_illegal_moves_leave_state() {
    let mut game = started(7);
    let before = game.board();
    assert!(matches!(
        game.apply_move(Hex::new(1, -1)),
        Err(ReversiError::CellOccupied { .. })
    ));
    assert!(matches!(
        game.apply_move(Hex::new(0, 0)),
        Err(ReversiError::IllegalMove { .. })
    ));
    assert!(matches!(
        game.apply_move(Hex::new(9, 9)),
        Err(ReversiError::OutOfBounds { .. })
    ));
    assert_eq!(game.board(), before);
    assert_eq!(game.current_mark(), Mark::O);
}

#[test]
fn test_observer_counts_every_change() {
    let mut game = Reversi::new(7).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    game.add_observer(move |view: &dyn GameView| {
        sink.borrow_mut().push((view.current_mark(), view.valid_moves().len()));
    });
    game.start().unwrap();
    game.apply_move(Hex::new(-1, -1)).unwrap();
    game.pass().unwrap();
    let log = log.borrow();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], (Mark::O, 6));
    assert_eq!(log[1].0, Mark::X);
    assert_eq!(log[2].0, Mark::O);
}

// ============================================================================
// STRATEGIES AND PLAYERS
// ============================================================================

#[test]
fn test_strategy_never_mutates_game() {
    let mut game = started(7);
    for turn in hard_vs_easy_turns().into_iter().take(8) {
        game.play(turn).unwrap();
    }
    let board = game.board();
    let scores = (game.score(Mark::O), game.score(Mark::X));
    let mark = game.current_mark();

    let hard = TryTwo::new(AnyOpenCorner, MostPointsCaptured);
    let choice = hard.choose_move(&game, mark);
    assert!(choice.is_some());

    assert_eq!(game.board(), board);
    assert_eq!((game.score(Mark::O), game.score(Mark::X)), scores);
    assert_eq!(game.current_mark(), mark);
}

#[test]
fn test_no_corner_on_fresh_five_rows() {
    let game = started(5);
    assert_eq!(AnyOpenCorner.choose_move(&game, Mark::O), None);
    assert_eq!(AnyOpenCorner.choose_move(&game, Mark::X), None);
}

#[test]
fn test_greedy_choice_is_valid_throughout() {
    let mut game = started(9);
    let strategy = MostPointsCaptured;
    for _ in 0..20 {
        if game.is_game_over() {
            break;
        }
        let mark = game.current_mark();
        match strategy.choose_move(&game, mark) {
            Some(hex) => {
                assert!(game.valid_moves().contains(&hex));
                let flips = game.collect_flips(hex).unwrap();
                let before = game.count(mark);
                game.apply_move(hex).unwrap();
                assert_eq!(game.count(mark), before + flips.len() + 1);
            }
            None => {
                assert!(game.valid_moves().is_empty());
                game.pass().unwrap();
            }
        }
    }
}

#[test]
fn test_human_and_ai_share_a_game() {
    let mut game = started(7);
    let mut human = HumanPlayer::new(Mark::O);
    let mut ai = AiPlayer::new(Mark::X, MostPointsCaptured);

    human.choose_move(Hex::new(1, 1));
    assert_eq!(human.play_chosen(&mut game), Ok(Some(place(1, 1))));
    assert_eq!(human.take_turn(&mut game), Ok(None));

    let turn = ai.take_turn(&mut game).unwrap();
    assert!(matches!(turn, Some(Turn::Place(_))));
    assert_eq!(game.current_mark(), Mark::O);
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_hard_vs_easy_full_game() {
    init_tracing();
    let config = MatchConfig::new(PlayerKind::HardAi, PlayerKind::EasyAi).with_rows(7);
    let outcome = MatchRunner::new(config).unwrap().run().unwrap();

    assert_eq!(outcome.turns, hard_vs_easy_turns());
    assert_eq!(outcome.o_score, 23);
    assert_eq!(outcome.x_score, 6);
    assert_eq!(outcome.result, GameResult::Winner(Mark::O));
    assert_eq!(outcome.winner(), Some(Mark::O));
    assert_eq!(outcome.passes(), 6);
    assert_eq!(outcome.placements(), 23);
}

#[test]
fn test_replaying_turns_reproduces_outcome() {
    let mut game = started(7);
    let calls = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&calls);
    game.add_observer(move |_: &dyn GameView| *counter.borrow_mut() += 1);

    for turn in hard_vs_easy_turns() {
        game.play(turn).unwrap();
    }
    assert!(game.is_game_over());
    assert_eq!(game.count(Mark::O), 23);
    assert_eq!(game.count(Mark::X), 6);
    assert_eq!(*calls.borrow(), hard_vs_easy_turns().len());
}

#[test]
fn test_random_matches_are_repeatable() {
    init_tracing();
    for rows in [5, 7, 9] {
        let config = MatchConfig::new(PlayerKind::RandomAi, PlayerKind::HardAi)
            .with_rows(rows)
            .with_seed(1234);
        let first = MatchRunner::new(config.clone()).unwrap().run().unwrap();
        let second = MatchRunner::new(config).unwrap().run().unwrap();
        assert_eq!(first, second);
        assert_ne!(first.result, GameResult::Ongoing);
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.json");
    let config = MatchConfig::new(PlayerKind::RandomAi, PlayerKind::HardAi)
        .with_rows(9)
        .with_seed(7)
        .with_max_turns(100);
    config.save(&path).unwrap();
    assert_eq!(MatchConfig::load(&path).unwrap(), config);
}

#[test]
fn test_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(MatchConfig::load(&missing).is_err());

    let even = dir.path().join("even.json");
    std::fs::write(&even, r#"{"rows": 8}"#).unwrap();
    let err = MatchConfig::load(&even).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ReversiError>(),
        Some(&ReversiError::InvalidSize(8))
    );

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ rows: ").unwrap();
    assert!(MatchConfig::load(&garbage).is_err());

    let unknown = dir.path().join("unknown.json");
    std::fs::write(&unknown, r#"{"o_player": "grandmaster"}"#).unwrap();
    assert!(MatchConfig::load(&unknown).is_err());
}

#[test]
fn test_player_kinds_build_players() {
    let human = PlayerKind::Human.build(Mark::O, 0);
    assert_eq!(human.mark(), Mark::O);

    let mut game = started(7);
    let mut hard = PlayerKind::HardAi.build(Mark::O, 0);
    assert_eq!(hard.take_turn(&mut game), Ok(Some(place(-1, -1))));
}
