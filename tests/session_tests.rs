//! Integration tests for the session round loop driven by the autoplay policy

use blockfit::core::{Grid, Piece, RulesConfig, Session, SessionSnapshot};
use blockfit::engine::{apply_move, apply_place, choose_move, Move, PlaceError};
use blockfit::types::{PieceColor, PieceSource, Position, ShapeKind, GRID_COLS, GRID_ROWS};

fn no_full_lines(grid: &Grid) -> bool {
    (0..GRID_ROWS).all(|r| !grid.is_row_full(r)) && (0..GRID_COLS).all(|c| !grid.is_col_full(c))
}

#[test]
fn test_session_lifecycle() {
    let mut session = Session::new(12345, RulesConfig::default());
    assert!(!session.game_over());
    assert_eq!(session.state().remaining_pieces(), 3);

    let mut last_score = 0;
    let mut last_rounds = 0;
    for _ in 0..400 {
        let Some(mv) = choose_move(session.state()) else {
            break;
        };
        let events = apply_move(&mut session, mv).expect("policy moves are legal");

        assert!(session.score() >= last_score);
        assert_eq!(session.score() - last_score, events.points);
        assert!(session.completed_rounds() >= last_rounds);
        assert!(no_full_lines(session.grid()));
        if events.round_completed {
            assert_eq!(session.completed_rounds(), last_rounds + 1);
            assert!(session.hold().is_none());
        }
        if events.game_over {
            assert!(session.game_over());
            assert!(choose_move(session.state()).is_none());
            break;
        }

        last_score = session.score();
        last_rounds = session.completed_rounds();
    }

    assert!(session.completed_rounds() > 0);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut session = Session::new(seed, RulesConfig::default());
        for _ in 0..60 {
            match choose_move(session.state()) {
                Some(mv) => {
                    apply_move(&mut session, mv).expect("legal");
                }
                None => break,
            }
        }
        session.snapshot()
    };

    assert_eq!(play(77), play(77));
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut session = Session::new(5, RulesConfig::default());
    for _ in 0..5 {
        if let Some(mv) = choose_move(session.state()) {
            apply_move(&mut session, mv).expect("legal");
        }
    }
    let snapshot = session.snapshot();

    let json = serde_json::to_string(&snapshot).expect("serialize");
    let back: SessionSnapshot = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, snapshot);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["grid"].as_array().map(Vec::len), Some(GRID_ROWS));
    assert_eq!(value["pieces"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_restored_session_continues() {
    let mut state = SessionSnapshot::default();
    state.score = 250;
    state.completed_rounds = 4;
    state.pieces = [
        Some(Piece::new(ShapeKind::Single, PieceColor::new(1), 0)),
        None,
        None,
    ];
    let mut session = Session::restore(state, 11, RulesConfig::default());

    let events = apply_place(&mut session, PieceSource::Slot(0), Position::new(3, 3)).unwrap();
    assert!(events.round_completed);
    assert_eq!(session.score(), 251 + if events.unique_solution { 100 } else { 0 });
    assert_eq!(session.completed_rounds(), 5);
    assert_eq!(session.state().remaining_pieces(), 3);
}

#[test]
fn test_custom_rules_change_bonuses() {
    let rules = RulesConfig {
        full_clear_bonus: 50,
        combo_warmup_rounds: 0,
        ..RulesConfig::default()
    };
    let mut state = SessionSnapshot::default();
    state.grid = Grid::from_ascii(&["#######."]);
    state.pieces = [
        Some(Piece::new(ShapeKind::Single, PieceColor::default(), 0)),
        Some(Piece::new(ShapeKind::Single, PieceColor::default(), 1)),
        None,
    ];
    let mut session = Session::restore(state, 1, rules);

    let events = apply_place(&mut session, PieceSource::Slot(0), Position::new(0, 7)).unwrap();
    assert!(events.full_clear);
    // (1 + 10) * 1.25 = 13, plus the configured bonus
    assert_eq!(events.points, 63);
    // No warm-up: the combo counts from the first round.
    assert_eq!(session.combo(), 1);
    assert!(events.combo_increased);
}

#[test]
fn test_last_bar_piece_into_hold_completes_round() {
    let mut state = SessionSnapshot::default();
    state.pieces = [
        None,
        None,
        Some(Piece::new(ShapeKind::QuadL, PieceColor::default(), 0)),
    ];
    let mut session = Session::restore(state, 3, RulesConfig::default());

    let events = apply_move(&mut session, Move::Hold { slot: 2 }).unwrap();
    assert!(events.round_completed);
    // The new round empties the holding slot.
    assert!(session.hold().is_none());
    assert_eq!(session.state().remaining_pieces(), 3);
    assert_eq!(
        apply_move(&mut session, Move::Hold { slot: 2 }).map(|_| ()),
        Ok(())
    );
    assert_eq!(
        apply_move(&mut session, Move::Hold { slot: 1 }).unwrap_err(),
        PlaceError::HoldOccupied
    );
}
