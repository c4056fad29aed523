//! Building positions from FEN and checking basic piece placement.

use chess_core::{PieceType, Player, Position, SQ};

#[test]
fn start_pos_has_the_standard_setup() {
    let pos = Position::start_pos();
    assert_eq!(pos.turn(), Player::White);
    assert_eq!(pos.piece_type_at(SQ(4)), PieceType::K);
    assert_eq!(pos.piece_type_at(SQ(60)), PieceType::K);
    assert_eq!(pos.occupied().count_bits(), 32);
    assert_eq!(pos.occupied_co(Player::White).count_bits(), 16);
    assert_eq!(pos.occupied_co(Player::Black).count_bits(), 16);
}

#[test]
fn kiwipete_places_kings_where_the_fen_says() {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    assert_eq!(pos.turn(), Player::White);
    assert_eq!(pos.king_sq(Player::White), SQ(4));
    assert_eq!(pos.king_sq(Player::Black), SQ(60));
}

#[test]
fn a_bare_king_endgame_has_only_two_pieces() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(pos.occupied().count_bits(), 2);
    assert!(pos.generate_moves().len() >= 3);
}

#[test]
fn malformed_fen_is_rejected() {
    assert!(Position::from_fen("not a fen").is_err());
    assert!(Position::from_fen("").is_err());
}
