//! [`Position`], the mutable chess position: piece placement, side to move, castling
//! rights, en-passant state, and the undo stack that lets `make_move`/`undo_move` act as
//! a reversible pair without re-deriving anything from scratch.
//!
//! Piece placement itself lives in the smaller [`Board`] struct — one bitboard per
//! player per piece type, a pair of per-player occupancy bitboards, the combined
//! occupancy, and a [`PieceLocations`] mailbox kept in lockstep with the bitboards.
//! `Position` wraps a `Board` with everything else a full game position needs.

pub mod board_state;
pub mod castle_rights;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod piece_locations;

pub use board_state::State;
pub use castle_rights::Castling;
pub use piece_locations::PieceLocations;

use std::fmt;

use crate::core::bitboard::BitBoard;
use crate::core::masks::*;
use crate::core::move_list::MoveList;
use crate::core::piece_move::Move;
use crate::core::sq::{SQ, NO_SQ};
use crate::core::{Piece, PieceType, Player, ALL_PIECE_TYPES, ALL_PLAYERS};
use crate::helper::Helper;

/// Piece placement: bitboards plus a square-indexed mailbox kept in sync with them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT],
    occupied_co: [BitBoard; PLAYER_CNT],
    occupied: BitBoard,
    mailbox: PieceLocations,
}

impl Board {
    fn empty() -> Board {
        Board {
            pieces: [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT],
            occupied_co: [BitBoard(0); PLAYER_CNT],
            occupied: BitBoard(0),
            mailbox: PieceLocations::blank(),
        }
    }

    #[inline]
    fn piece_bb(&self, player: Player, piece_type: PieceType) -> BitBoard {
        self.pieces[player as usize][piece_type as usize]
    }

    fn put_piece(&mut self, player: Player, piece_type: PieceType, sq: SQ) {
        let bb = sq.to_bb();
        self.pieces[player as usize][piece_type as usize] |= bb;
        self.occupied_co[player as usize] |= bb;
        self.occupied |= bb;
        self.mailbox.place(sq, player, piece_type);
    }

    fn remove_piece(&mut self, player: Player, piece_type: PieceType, sq: SQ) {
        let bb = sq.to_bb();
        self.pieces[player as usize][piece_type as usize] &= !bb;
        self.occupied_co[player as usize] &= !bb;
        self.occupied &= !bb;
        self.mailbox.remove(sq);
    }

    fn move_piece(&mut self, player: Player, piece_type: PieceType, from: SQ, to: SQ) {
        let mask = from.to_bb() | to.to_bb();
        self.pieces[player as usize][piece_type as usize] ^= mask;
        self.occupied_co[player as usize] ^= mask;
        self.occupied ^= mask;
        self.mailbox.remove(from);
        self.mailbox.place(to, player, piece_type);
    }
}

/// Returns the rook's home and castled squares for `player`'s castle on the given side.
fn castle_rook_squares(player: Player, king_side: bool) -> (SQ, SQ) {
    match (player, king_side) {
        (Player::White, true) => (SQ::H1, SQ::F1),
        (Player::White, false) => (SQ::A1, SQ::D1),
        (Player::Black, true) => (SQ::H8, SQ::F8),
        (Player::Black, false) => (SQ::A8, SQ::D8),
    }
}

/// A complete chess position: piece placement, side to move, and every piece of state a
/// legal move depends on.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    turn: Player,
    castling: Castling,
    ep_square: SQ,
    ep_target: SQ,
    half_move_clock: u16,
    full_move_count: u16,
    /// Squares the side to move's king may not step onto.
    king_ban: BitBoard,
    hash: u64,
    history: Vec<State>,
}

impl Position {
    /// The standard chess starting position, White to move.
    pub fn start_pos() -> Position {
        let mut board = Board::empty();
        let placements: [(PieceType, u64, u64); 6] = [
            (PieceType::P, START_W_PAWN, START_B_PAWN),
            (PieceType::N, START_W_KNIGHT, START_B_KNIGHT),
            (PieceType::B, START_W_BISHOP, START_B_BISHOP),
            (PieceType::R, START_W_ROOK, START_B_ROOK),
            (PieceType::Q, START_W_QUEEN, START_B_QUEEN),
            (PieceType::K, START_W_KING, START_B_KING),
        ];
        for &(piece_type, white_mask, black_mask) in placements.iter() {
            let mut white_bb = BitBoard(white_mask);
            while let Some(sq) = white_bb.pop_some_lsb() {
                board.put_piece(Player::White, piece_type, sq);
            }
            let mut black_bb = BitBoard(black_mask);
            while let Some(sq) = black_bb.pop_some_lsb() {
                board.put_piece(Player::Black, piece_type, sq);
            }
        }

        let mut pos = Position {
            board,
            turn: Player::White,
            castling: Castling::all_castling(),
            ep_square: NO_SQ,
            ep_target: NO_SQ,
            half_move_clock: 0,
            full_move_count: 1,
            king_ban: BitBoard(0),
            hash: 0,
            history: Vec::new(),
        };
        pos.hash = pos.compute_hash();
        pos.king_ban = pos.compute_king_ban(Player::White);
        pos
    }

    /// Builds a position directly from its fields, used by FEN parsing once the fields
    /// have been individually validated.
    pub(crate) fn from_parts(
        board: Board,
        turn: Player,
        castling: Castling,
        ep_square: SQ,
        ep_target: SQ,
        half_move_clock: u16,
        full_move_count: u16,
    ) -> Position {
        let mut pos = Position {
            board,
            turn,
            castling,
            ep_square,
            ep_target,
            half_move_clock,
            full_move_count,
            king_ban: BitBoard(0),
            hash: 0,
            history: Vec::new(),
        };
        pos.hash = pos.compute_hash();
        pos.king_ban = pos.compute_king_ban(turn);
        pos
    }

    fn compute_hash(&self) -> u64 {
        let h = Helper::new();
        let mut hash = 0u64;
        for &player in ALL_PLAYERS.iter() {
            for &piece_type in ALL_PIECE_TYPES.iter() {
                let mut bb = self.board.piece_bb(player, piece_type);
                while let Some(sq) = bb.pop_some_lsb() {
                    hash ^= h.z_square(sq, Piece::make_lossy(player, piece_type));
                }
            }
        }
        hash ^= h.z_castle(self.castling.bits());
        if self.ep_square != NO_SQ {
            hash ^= h.z_ep(self.ep_square);
        }
        if self.turn == Player::Black {
            hash ^= h.z_side();
        }
        hash
    }

    /// Squares `player`'s king may not step onto: the union of every enemy piece's
    /// attack set, computed with `player`'s own king removed from slider occupancy so
    /// that a king cannot "escape" an attacker along the same ray it's blocking.
    fn compute_king_ban(&self, player: Player) -> BitBoard {
        let h = Helper::new();
        let opp = player.other_player();
        let occ_without_king = self.board.occupied & !self.board.piece_bb(player, PieceType::K);

        let mut ban = BitBoard(0);
        ban |= h.king_moves(self.board.piece_bb(opp, PieceType::K).to_sq());

        let mut knights = self.board.piece_bb(opp, PieceType::N);
        while let Some(sq) = knights.pop_some_lsb() {
            ban |= h.knight_moves(sq);
        }

        let mut diag = self.board.piece_bb(opp, PieceType::B) | self.board.piece_bb(opp, PieceType::Q);
        while let Some(sq) = diag.pop_some_lsb() {
            ban |= h.bishop_moves(occ_without_king, sq);
        }

        let mut orth = self.board.piece_bb(opp, PieceType::R) | self.board.piece_bb(opp, PieceType::Q);
        while let Some(sq) = orth.pop_some_lsb() {
            ban |= h.rook_moves(occ_without_king, sq);
        }

        let mut pawns = self.board.piece_bb(opp, PieceType::P);
        while let Some(sq) = pawns.pop_some_lsb() {
            ban |= h.pawn_attacks_from(sq, opp);
        }

        ban
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn occupied(&self) -> BitBoard {
        self.board.occupied
    }

    #[inline]
    pub fn occupied_co(&self, player: Player) -> BitBoard {
        self.board.occupied_co[player as usize]
    }

    #[inline]
    pub fn piece_bb(&self, player: Player, piece_type: PieceType) -> BitBoard {
        self.board.piece_bb(player, piece_type)
    }

    #[inline]
    pub fn piece_type_at(&self, sq: SQ) -> PieceType {
        self.board.mailbox.piece_type_at(sq)
    }

    #[inline]
    pub fn piece_at(&self, sq: SQ) -> Piece {
        self.board.mailbox.piece_at(sq)
    }

    #[inline]
    pub fn king_sq(&self, player: Player) -> SQ {
        self.board.piece_bb(player, PieceType::K).to_sq()
    }

    #[inline]
    pub fn king_ban(&self) -> BitBoard {
        self.king_ban
    }

    #[inline]
    pub fn ep_square(&self) -> SQ {
        self.ep_square
    }

    #[inline]
    pub fn ep_target(&self) -> SQ {
        self.ep_target
    }

    #[inline]
    pub fn castling(&self) -> Castling {
        self.castling
    }

    #[inline]
    pub fn half_move_clock(&self) -> u16 {
        self.half_move_clock
    }

    #[inline]
    pub fn full_move_count(&self) -> u16 {
        self.full_move_count
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The set of enemy pieces currently attacking the side to move's king.
    pub fn checkers(&self) -> BitBoard {
        let h = Helper::new();
        let us = self.turn;
        let them = us.other_player();
        let king_sq = self.king_sq(us);
        let occ = self.occupied();

        let mut checkers = BitBoard(0);
        checkers |= h.pawn_attacks_from(king_sq, us) & self.piece_bb(them, PieceType::P);
        checkers |= h.knight_moves(king_sq) & self.piece_bb(them, PieceType::N);
        let diag = self.piece_bb(them, PieceType::B) | self.piece_bb(them, PieceType::Q);
        checkers |= h.bishop_moves(occ, king_sq) & diag;
        let orth = self.piece_bb(them, PieceType::R) | self.piece_bb(them, PieceType::Q);
        checkers |= h.rook_moves(occ, king_sq) & orth;
        checkers
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers().is_not_empty()
    }

    pub fn generate_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    pub fn generate_captures(&self) -> MoveList {
        movegen::legal_captures(self)
    }

    /// Whether the side to move has no legal replies.
    pub fn is_terminal(&self) -> bool {
        self.generate_moves().is_empty()
    }

    /// Parses a FEN string into a position. See [`fen::from_fen`].
    pub fn from_fen(fen_str: &str) -> Result<Position, crate::error::EngineError> {
        fen::from_fen(fen_str)
    }

    /// Serializes this position back to FEN. See [`fen::to_fen`].
    pub fn fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Applies `mv`, pushing the information needed to undo it. `mv` must have been
    /// generated from this exact position; no legality re-check is performed.
    pub fn make_move(&mut self, mv: Move) {
        let h = Helper::new();
        let us = self.turn;
        let them = us.other_player();

        self.history.push(State {
            king_ban: self.king_ban,
            occupied: self.board.occupied,
            ep_square: self.ep_square,
            ep_target: self.ep_target,
            castling: self.castling,
            half_move_clock: self.half_move_clock,
            hash: self.hash,
        });

        let mut hash = self.hash;
        if self.ep_square != NO_SQ {
            hash ^= h.z_ep(self.ep_square);
        }

        let src = mv.src;
        let dst = mv.dst;

        if mv.is_castle() {
            let (rook_src, rook_dst) = castle_rook_squares(us, mv.is_king_castle());
            self.board.move_piece(us, PieceType::K, src, dst);
            self.board.move_piece(us, PieceType::R, rook_src, rook_dst);
            hash ^= h.z_square(src, Piece::make_lossy(us, PieceType::K));
            hash ^= h.z_square(dst, Piece::make_lossy(us, PieceType::K));
            hash ^= h.z_square(rook_src, Piece::make_lossy(us, PieceType::R));
            hash ^= h.z_square(rook_dst, Piece::make_lossy(us, PieceType::R));
        } else {
            if mv.is_en_passant() {
                let cap_sq = mv.ep_capture_sq();
                self.board.remove_piece(them, PieceType::P, cap_sq);
                hash ^= h.z_square(cap_sq, Piece::make_lossy(them, PieceType::P));
            } else if mv.is_capture() {
                self.board.remove_piece(them, mv.captured, dst);
                hash ^= h.z_square(dst, Piece::make_lossy(them, mv.captured));
            }

            self.board.remove_piece(us, mv.piece, src);
            hash ^= h.z_square(src, Piece::make_lossy(us, mv.piece));

            let landed = if mv.is_promotion() { mv.promoted } else { mv.piece };
            self.board.put_piece(us, landed, dst);
            hash ^= h.z_square(dst, Piece::make_lossy(us, landed));
        }

        let cleared = self.castling.update_castling(src, dst);
        if !cleared.no_castling() {
            hash ^= h.z_castle(cleared.bits());
        }

        self.ep_square = NO_SQ;
        self.ep_target = NO_SQ;
        if mv.is_double_pawn_push() {
            let candidate_ep = SQ(((src.0 as u16 + dst.0 as u16) / 2) as u8);
            let can_be_captured =
                h.pawn_attacks_from(candidate_ep, us) & self.board.piece_bb(them, PieceType::P);
            if can_be_captured.is_not_empty() {
                self.ep_square = candidate_ep;
                self.ep_target = dst;
                hash ^= h.z_ep(candidate_ep);
            }
        }

        if mv.piece == PieceType::P || mv.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }

        if us == Player::Black {
            self.full_move_count += 1;
        }

        self.turn = them;
        hash ^= h.z_side();
        self.hash = hash;
        self.king_ban = self.compute_king_ban(self.turn);
    }

    /// Reverses the most recent [`Position::make_move`]. `mv` must be the same move that
    /// was just made.
    pub fn undo_move(&mut self, mv: Move) {
        let us = self.turn.other_player();
        let opp = self.turn;
        let state = self
            .history
            .pop()
            .expect("undo_move called with no prior make_move");

        if mv.is_castle() {
            let (rook_src, rook_dst) = castle_rook_squares(us, mv.is_king_castle());
            self.board.move_piece(us, PieceType::K, mv.dst, mv.src);
            self.board.move_piece(us, PieceType::R, rook_dst, rook_src);
        } else {
            if mv.is_promotion() {
                self.board.remove_piece(us, mv.promoted, mv.dst);
                self.board.put_piece(us, PieceType::P, mv.src);
            } else {
                self.board.move_piece(us, mv.piece, mv.dst, mv.src);
            }

            if mv.is_en_passant() {
                self.board.put_piece(opp, PieceType::P, mv.ep_capture_sq());
            } else if mv.is_capture() {
                self.board.put_piece(opp, mv.captured, mv.dst);
            }
        }

        debug_assert_eq!(self.board.occupied, state.occupied);

        self.king_ban = state.king_ban;
        self.ep_square = state.ep_square;
        self.ep_target = state.ep_target;
        self.castling = state.castling;
        self.half_move_clock = state.half_move_clock;
        self.hash = state.hash;

        if us == Player::Black {
            self.full_move_count -= 1;
        }
        self.turn = us;
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start_pos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &idx in SQ_DISPLAY_ORDER.iter() {
            let sq = SQ(idx);
            let c = match self.piece_at(sq).player_piece() {
                Some((player, piece_type)) => PIECE_DISPLAYS[player as usize][piece_type as usize],
                None => '.',
            };
            write!(f, "{} ", c)?;
            if sq.file_idx_of_sq() == 7 {
                writeln!(f)?;
            }
        }
        writeln!(f, "Turn: {}", self.turn)?;
        write!(f, "Castling: {}", self.castling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece_move::MoveFlags;

    #[test]
    fn start_pos_has_correct_piece_counts() {
        let pos = Position::start_pos();
        assert_eq!(pos.piece_bb(Player::White, PieceType::P).count_bits(), 8);
        assert_eq!(pos.piece_bb(Player::Black, PieceType::P).count_bits(), 8);
        assert_eq!(pos.occupied().count_bits(), 32);
        assert_eq!(pos.turn(), Player::White);
        assert!(!pos.in_check());
    }

    #[test]
    fn make_and_undo_round_trips_quiet_move() {
        let mut pos = Position::start_pos();
        let before_hash = pos.hash();
        let mv = Move::quiet(SQ::E2, SQ::E4, PieceType::P);
        pos.make_move(mv);
        assert_eq!(pos.turn(), Player::Black);
        assert_eq!(pos.ep_square(), SQ::E3);
        pos.undo_move(mv);
        assert_eq!(pos.turn(), Player::White);
        assert_eq!(pos.hash(), before_hash);
        assert_eq!(pos.occupied().count_bits(), 32);
    }

    #[test]
    fn double_pawn_push_without_capture_threat_sets_no_ep() {
        let mut pos = Position::start_pos();
        // h-pawn double push has no adjacent enemy pawn able to capture en passant.
        let mv = Move::double_pawn_push(SQ::H2, SQ::H4, PieceType::P);
        pos.make_move(mv);
        assert_eq!(pos.ep_square(), NO_SQ);
    }

    #[test]
    fn castle_king_side_moves_both_pieces() {
        let mut board = Board::empty();
        board.put_piece(Player::White, PieceType::K, SQ::E1);
        board.put_piece(Player::White, PieceType::R, SQ::H1);
        board.put_piece(Player::Black, PieceType::K, SQ::E8);
        let mut pos = Position::from_parts(
            board,
            Player::White,
            Castling::all_castling(),
            NO_SQ,
            NO_SQ,
            0,
            1,
        );
        let mv = Move::castle(SQ::E1, SQ::G1, true);
        pos.make_move(mv);
        assert_eq!(pos.piece_type_at(SQ::G1), PieceType::K);
        assert_eq!(pos.piece_type_at(SQ::F1), PieceType::R);
        assert_eq!(pos.piece_type_at(SQ::E1), PieceType::None);
        assert_eq!(pos.piece_type_at(SQ::H1), PieceType::None);
        pos.undo_move(mv);
        assert_eq!(pos.piece_type_at(SQ::E1), PieceType::K);
        assert_eq!(pos.piece_type_at(SQ::H1), PieceType::R);
    }

    #[test]
    fn en_passant_capture_removes_target_pawn() {
        let mut board = Board::empty();
        board.put_piece(Player::White, PieceType::K, SQ::E1);
        board.put_piece(Player::Black, PieceType::K, SQ::E8);
        board.put_piece(Player::White, PieceType::P, SQ::E5);
        board.put_piece(Player::Black, PieceType::P, SQ::D5);
        let mut pos = Position::from_parts(
            board,
            Player::White,
            Castling::none(),
            SQ::D6,
            SQ::D5,
            0,
            1,
        );
        let mv = Move::en_passant(SQ::E5, SQ::D6, PieceType::P);
        assert!(mv.flags.contains(MoveFlags::CAPTURE));
        pos.make_move(mv);
        assert_eq!(pos.piece_type_at(SQ::D5), PieceType::None);
        assert_eq!(pos.piece_type_at(SQ::D6), PieceType::P);
        pos.undo_move(mv);
        assert_eq!(pos.piece_type_at(SQ::D5), PieceType::P);
        assert_eq!(pos.piece_type_at(SQ::E5), PieceType::P);
    }
}
