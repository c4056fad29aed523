//! FEN parsing and round-tripping.

use chess_core::{PieceType, Player, Position};

fn count(pos: &Position, player: Player, piece_type: PieceType) -> u8 {
    pos.piece_bb(player, piece_type).count_bits()
}

#[test]
fn piece_counts_from_a_sparse_endgame_fen() {
    let pos = Position::from_fen("k6r/1p2b3/8/8/8/8/P4KPP/1B5R w KQkq - 0 3").unwrap();
    assert_eq!(count(&pos, Player::White, PieceType::P), 3);
    assert_eq!(count(&pos, Player::White, PieceType::N), 0);
    assert_eq!(count(&pos, Player::White, PieceType::B), 1);
    assert_eq!(count(&pos, Player::White, PieceType::R), 1);
    assert_eq!(count(&pos, Player::White, PieceType::Q), 0);
    assert_eq!(count(&pos, Player::White, PieceType::K), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::P), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::N), 0);
    assert_eq!(count(&pos, Player::Black, PieceType::B), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::R), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::Q), 0);
    assert_eq!(count(&pos, Player::Black, PieceType::K), 1);
}

#[test]
fn piece_counts_from_a_crowded_fen() {
    let pos = Position::from_fen("8/2Q1pk2/nbpppppp/8/8/2K4N/PPPPPPPP/BBB2BBB w - - 0 10").unwrap();
    assert_eq!(count(&pos, Player::White, PieceType::P), 8);
    assert_eq!(count(&pos, Player::White, PieceType::N), 1);
    assert_eq!(count(&pos, Player::White, PieceType::B), 6);
    assert_eq!(count(&pos, Player::White, PieceType::R), 0);
    assert_eq!(count(&pos, Player::White, PieceType::Q), 1);
    assert_eq!(count(&pos, Player::White, PieceType::K), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::P), 7);
    assert_eq!(count(&pos, Player::Black, PieceType::N), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::B), 1);
    assert_eq!(count(&pos, Player::Black, PieceType::R), 0);
    assert_eq!(count(&pos, Player::Black, PieceType::Q), 0);
    assert_eq!(count(&pos, Player::Black, PieceType::K), 1);
}

const ROUND_TRIP_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2Q1pk2/nbpppppp/8/8/2K4N/PPPPPPPP/BBB2BBB w - - 0 10",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
];

#[test]
fn fens_round_trip_through_parse_and_render() {
    for fen in ROUND_TRIP_FENS {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(*fen, pos.fen());
    }
}
