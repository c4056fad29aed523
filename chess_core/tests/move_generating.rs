//! Move generation across a handful of positions that exercise captures, castling,
//! en passant, and promotion, plus the basic invariant that `generate_captures()` is a
//! subset of `generate_moves()`.

use chess_core::{PieceType, Position};

#[test]
fn the_opening_position_has_twenty_legal_moves() {
    let pos = Position::start_pos();
    assert_eq!(pos.generate_moves().len(), 20);
}

#[test]
fn every_capture_move_is_flagged_as_a_capture_and_names_the_captured_piece() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();

    for mv in pos.generate_captures().as_slice() {
        if mv.is_en_passant() {
            continue;
        }
        assert!(mv.is_capture());
        assert_ne!(mv.captured, PieceType::None);
    }
}

#[test]
fn generate_captures_is_a_subset_of_generate_moves() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();

    let all = pos.generate_moves();
    for mv in pos.generate_captures().as_slice() {
        assert!(all.as_slice().contains(mv));
    }
}

#[test]
fn castling_moves_are_offered_when_both_sides_may_castle() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves = pos.generate_moves();
    let castles: Vec<_> = moves
        .as_slice()
        .iter()
        .filter(|mv| mv.is_castle())
        .collect();
    assert_eq!(castles.len(), 2);
}

#[test]
fn en_passant_is_offered_immediately_after_the_double_push() {
    let pos = Position::from_fen(
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    )
    .unwrap();
    assert!(pos
        .generate_moves()
        .as_slice()
        .iter()
        .any(|mv| mv.is_en_passant()));
}

#[test]
fn pawns_on_the_seventh_rank_can_promote_to_any_piece() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/7K/8 w - - 0 1").unwrap();
    let promos: Vec<PieceType> = pos
        .generate_moves()
        .as_slice()
        .iter()
        .filter(|mv| mv.is_promotion())
        .map(|mv| mv.promoted)
        .collect();
    assert!(promos.contains(&PieceType::Q));
    assert!(promos.contains(&PieceType::R));
    assert!(promos.contains(&PieceType::B));
    assert!(promos.contains(&PieceType::N));
}
