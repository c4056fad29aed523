//! Integration tests driving the whole engine through its public API, rather than a
//! single search-internals function.

use chess_engine::engine::Engine;
use chess_engine::options::EngineOptions;

fn engine_at_depth(fen: &str, depth: u8) -> Engine {
    let mut options = EngineOptions::default();
    options.max_depth = depth;
    let mut engine = Engine::with_options(options).unwrap();
    engine.position_from_fen(fen).unwrap();
    engine
}

#[test]
fn searching_the_starting_position_returns_a_legal_opening_move() {
    let engine = engine_at_depth(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        3,
    );
    let result = engine.search();
    assert!(engine.legal_moves().contains(&result.best_move));
    assert!(!result.pv.is_empty());
    assert_eq!(result.pv[0], result.best_move);
}

#[test]
fn finds_a_one_move_mate() {
    // Black's king is boxed in on the back rank; Ra1-a8 is mate.
    let engine = engine_at_depth("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 3);
    let result = engine.search();
    assert!(result.score > 9_000, "expected a mate score, got {}", result.score);
}

#[test]
fn rejects_applying_a_move_that_is_not_legal_here() {
    let mut engine = engine_at_depth(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        1,
    );
    assert!(engine.apply_uci_move("e2e5").is_err());
    assert!(engine.apply_uci_move("e2e4").is_ok());
}

#[test]
fn search_depth_increases_node_count() {
    let shallow = engine_at_depth("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 1);
    let deep = engine_at_depth("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3);
    let shallow_result = shallow.search();
    let deep_result = deep.search();
    assert!(deep_result.nodes >= shallow_result.nodes);
}
