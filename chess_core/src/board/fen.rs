//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! A FEN string describes one position: piece placement, side to move, castling
//! rights, en-passant target, half-move clock, and full-move number. See
//! <https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation>.

use once_cell::sync::Lazy;

use crate::board::{Board, Castling, Position};
use crate::core::bitboard::BitBoard;
use crate::core::sq::{SQ, NO_SQ};
use crate::core::{Piece, PieceType, Player, Rank};
use crate::error::EngineError;

/// The FEN for the standard chess starting position.
pub const OPENING_POS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A representative sample of mid-game, endgame, and mate/stalemate positions, used by
/// perft and evaluation tests that need more than the opening position.
#[doc(hidden)]
pub static STANDARD_TEST_FENS: [&str; 12] = [
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 10",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 11",
    "4rrk1/pp1n3p/3q2pQ/2p1pb2/2PP4/2P3N1/P2B2PP/4RRK1 b - - 7 19",
    "r3r1k1/2p2ppp/p1p1bn2/8/1q2P3/2NPQN2/PPP3PP/R4RK1 b - - 2 15",
    "r1bq1rk1/ppp1nppp/4n3/3p3Q/3P4/1BP1B3/PP1N2PP/R4RK1 w - - 1 16",
    "2rqkb1r/ppp2p2/2npb1p1/1N1Nn2p/2P1PP2/8/PP2B1PP/R1BQK2R b KQ - 0 11",
    "8/8/8/8/5kp1/P7/8/1K1N4 w - - 0 1",
    "8/8/8/5N2/8/p7/8/2NK3k w - - 0 1",
    "8/3k4/8/8/8/4B3/4KB2/2B5 w - - 0 1",
    "8/R7/2q5/8/6k1/8/1P5p/K6R w - - 0 124",
    "6k1/3b3r/1p1p4/p1n2p2/1PPNpP1q/P3Q1p1/1R1RB1P1/5K2 b - - 0 1",
    "7k/7P/6K1/8/3B4/8/8/8 b - - 0 1",
];

/// Every FEN position used as a test fixture across the crate, for fuzz-style coverage.
pub static ALL_FENS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut fens = vec![OPENING_POS_FEN];
    fens.extend_from_slice(&STANDARD_TEST_FENS);
    fens
});

/// Parses a FEN string into a [`Position`].
pub fn from_fen(fen: &str) -> Result<Position, EngineError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(EngineError::InvalidFen {
            reason: format!("expected at least 4 space-separated fields, got {}", fields.len()),
        });
    }

    let mut board = Board::empty();
    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::InvalidFen {
            reason: format!("expected 8 ranks, got {}", ranks.len()),
        });
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank_idx = 7 - rank_from_top as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let (player, piece_type) = char_to_piece(c).ok_or_else(|| EngineError::InvalidFen {
                    reason: format!("invalid piece character '{}'", c),
                })?;
                if file > 7 {
                    return Err(EngineError::InvalidFen {
                        reason: format!("rank {} has more than 8 files", rank_idx + 1),
                    });
                }
                board.put_piece(player, piece_type, SQ(rank_idx * 8 + file));
                file += 1;
            }
        }
        if file != 8 {
            return Err(EngineError::InvalidFen {
                reason: format!("rank {} has {} files, expected 8", rank_idx + 1, file),
            });
        }
    }

    let turn = match fields[1] {
        "w" => Player::White,
        "b" => Player::Black,
        other => {
            return Err(EngineError::InvalidFen {
                reason: format!("invalid side to move '{}'", other),
            })
        }
    };

    let mut castling = Castling::none();
    if fields[2] != "-" {
        for c in fields[2].chars() {
            castling.add_castling_char(c).map_err(|c| EngineError::InvalidFen {
                reason: format!("invalid castling-rights character '{}'", c),
            })?;
        }
    }

    let ep_square = if fields[3] == "-" {
        NO_SQ
    } else {
        parse_square(fields[3]).ok_or_else(|| EngineError::InvalidFen {
            reason: format!("invalid en-passant square '{}'", fields[3]),
        })?
    };
    let ep_target = if ep_square == NO_SQ {
        NO_SQ
    } else {
        match turn {
            Player::White => SQ(ep_square.0 - 8),
            Player::Black => SQ(ep_square.0 + 8),
        }
    };

    let half_move_clock = fields.get(4).and_then(|s| s.parse::<u16>().ok()).unwrap_or(0);
    let full_move_count = fields
        .get(5)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(1)
        .max(1);

    let pos = Position::from_parts(
        board,
        turn,
        castling,
        ep_square,
        ep_target,
        half_move_clock,
        full_move_count,
    );

    validate(&pos)?;
    Ok(pos)
}

/// Serializes a [`Position`] back to FEN.
pub fn to_fen(pos: &Position) -> String {
    let mut s = String::new();
    for rank in (0u8..8).rev() {
        let mut empty_run = 0u8;
        for file in 0u8..8 {
            let sq = SQ(rank * 8 + file);
            match pos.piece_at(sq).player_piece() {
                None => empty_run += 1,
                Some((player, piece_type)) => {
                    if empty_run > 0 {
                        s.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    s.push(piece_char(player, piece_type));
                }
            }
        }
        if empty_run > 0 {
            s.push_str(&empty_run.to_string());
        }
        if rank > 0 {
            s.push('/');
        }
    }
    s.push(' ');
    s.push(if pos.turn() == Player::White { 'w' } else { 'b' });
    s.push(' ');
    s.push_str(&pos.castling().pretty_string());
    s.push(' ');
    if pos.ep_square() == NO_SQ {
        s.push('-');
    } else {
        s.push_str(&pos.ep_square().to_string());
    }
    s.push(' ');
    s.push_str(&pos.half_move_clock().to_string());
    s.push(' ');
    s.push_str(&pos.full_move_count().to_string());
    s
}

/// Structural legality checks that a syntactically valid FEN can still violate: an
/// impossible double-check, pawns on the back ranks, too many pawns, or an en-passant
/// square with no pawn behind it to justify it.
fn validate(pos: &Position) -> Result<(), EngineError> {
    let mut checkers = pos.checkers();
    let num_checkers = checkers.count_bits();
    if num_checkers > 2 {
        return Err(EngineError::InvalidFen {
            reason: "more than two pieces give check simultaneously".to_string(),
        });
    }
    if num_checkers == 2 {
        let p1 = pos.piece_type_at(checkers.pop_lsb());
        let p2 = pos.piece_type_at(checkers.pop_lsb());
        let impossible = matches!(
            (p1, p2),
            (PieceType::P, PieceType::P)
                | (PieceType::P, PieceType::B)
                | (PieceType::P, PieceType::N)
                | (PieceType::B, PieceType::P)
                | (PieceType::B, PieceType::B)
                | (PieceType::N, PieceType::P)
                | (PieceType::N, PieceType::N)
        );
        if impossible {
            return Err(EngineError::InvalidFen {
                reason: format!("{:?} and {:?} can never check a king simultaneously", p1, p2),
            });
        }
    }

    for &player in &[Player::White, Player::Black] {
        let pawns = pos.piece_bb(player, PieceType::P);
        if (pawns & (BitBoard::RANK_1 | BitBoard::RANK_8)).is_not_empty() {
            return Err(EngineError::InvalidFen {
                reason: format!("{:?} has a pawn on the first or last rank", player),
            });
        }
        if pawns.count_bits() > 8 {
            return Err(EngineError::InvalidFen {
                reason: format!("{:?} has more than 8 pawns", player),
            });
        }
    }

    if pos.ep_square() != NO_SQ {
        let expected_rank = match pos.turn() {
            Player::White => Rank::R6,
            Player::Black => Rank::R3,
        };
        if pos.ep_square().rank() != expected_rank {
            return Err(EngineError::InvalidFen {
                reason: "en-passant square is on the wrong rank for the side to move".to_string(),
            });
        }
        let target = pos.ep_target();
        if pos.piece_at(target).player() != Some(pos.turn().other_player())
            || pos.piece_type_at(target) != PieceType::P
        {
            return Err(EngineError::InvalidFen {
                reason: "en-passant square has no capturable pawn behind it".to_string(),
            });
        }
    }

    Ok(())
}

fn char_to_piece(c: char) -> Option<(Player, PieceType)> {
    let player = if c.is_ascii_uppercase() { Player::White } else { Player::Black };
    let piece_type = match c.to_ascii_lowercase() {
        'p' => PieceType::P,
        'n' => PieceType::N,
        'b' => PieceType::B,
        'r' => PieceType::R,
        'q' => PieceType::Q,
        'k' => PieceType::K,
        _ => return None,
    };
    Some((player, piece_type))
}

fn piece_char(player: Player, piece_type: PieceType) -> char {
    if player == Player::White {
        piece_type.char_upper()
    } else {
        piece_type.char_lower()
    }
}

fn parse_square(s: &str) -> Option<SQ> {
    let mut chars = s.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(SQ((rank as u8 - b'1') * 8 + (file as u8 - b'a')))
}
