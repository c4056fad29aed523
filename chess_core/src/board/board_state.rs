//! `State`: the per-ply snapshot pushed onto `Position`'s undo stack before every make
//! and popped on undo.
//!
//! Unlike the teacher's `BoardState`, which is heap-shared via `Arc` so that cheap
//! `Board::clone()` works for lazy-SMP search, this is a plain value living in
//! `Position`'s own `Vec<State>` — the YBWC design (`chess_engine::ybwc`) clones a whole
//! `Position` once at split time rather than sharing history between threads, so nothing
//! here needs to be reference-counted.

use crate::board::castle_rights::Castling;
use crate::core::bitboard::BitBoard;
use crate::core::sq::{SQ, NO_SQ};

/// Everything Make mutates and Undo must restore without recomputation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Squares the side to move's king may not step onto (opponent's full attack set,
    /// computed with the king itself removed from slider occupancy).
    pub king_ban: BitBoard,
    pub occupied: BitBoard,
    /// The en-passant square a pawn could capture onto, or `NO_SQ`.
    pub ep_square: SQ,
    /// The pawn that just double-pushed, captured by an en-passant move onto `ep_square`.
    pub ep_target: SQ,
    pub castling: Castling,
    pub half_move_clock: u16,
    pub hash: u64,
}

impl State {
    pub const fn blank() -> State {
        State {
            king_ban: BitBoard(0),
            occupied: BitBoard(0),
            ep_square: NO_SQ,
            ep_target: NO_SQ,
            castling: Castling::all_castling(),
            half_move_clock: 0,
            hash: 0,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::blank()
    }
}
