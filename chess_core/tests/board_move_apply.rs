//! Make/undo round trips across the move kinds that touch extra state besides the
//! moved piece: captures, castling, en passant, and promotion.

use chess_core::Position;

fn assert_round_trips(fen: &str, uci_moves: &[&str]) {
    let mut pos = Position::from_fen(fen).unwrap();
    let before = pos.fen();
    let before_hash = pos.hash();

    let mut applied = Vec::with_capacity(uci_moves.len());
    for uci in uci_moves {
        let mv = pos
            .generate_moves()
            .as_slice()
            .iter()
            .copied()
            .find(|mv| mv.stringify() == *uci)
            .unwrap_or_else(|| panic!("{} is not legal in {}", uci, pos.fen()));
        pos.make_move(mv);
        applied.push(mv);
    }

    for mv in applied.into_iter().rev() {
        pos.undo_move(mv);
    }

    assert_eq!(pos.fen(), before);
    assert_eq!(pos.hash(), before_hash);
}

#[test]
fn a_capture_round_trips() {
    assert_round_trips(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &["e2e4", "d7d5", "e4d5"],
    );
}

#[test]
fn kingside_castling_round_trips() {
    assert_round_trips(
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        &["e1g1"],
    );
}

#[test]
fn en_passant_round_trips() {
    assert_round_trips(
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        &["e5d6"],
    );
}

#[test]
fn promotion_round_trips() {
    assert_round_trips("8/P6k/8/8/8/8/7K/8 w - - 0 1", &["a7a8q"]);
}

#[test]
fn a_sequence_of_moves_fully_restores_the_position() {
    assert_round_trips(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &["g1f3", "b8c6", "f3e5", "c6e5"],
    );
}
