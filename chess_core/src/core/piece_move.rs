//! A single chess move and the metadata attached to it.
//!
//! Unlike a packed-bits move encoding, [`Move`] stores its fields explicitly: the
//! source and destination squares, the piece that moved, a capture/promotion record,
//! and a [`MoveFlags`] bitset describing its special-move category. This costs a few
//! more bytes per move than a 16-bit encoding but means a `Move` can be inspected and
//! constructed without bit-twiddling at every call site — legal generation, search,
//! and move ordering all read and write these fields directly.
//!
//! A `Move` is only meaningful relative to the `Position` it was generated from.
//! Replaying one against an unrelated position is not checked and not supported.

use std::cmp::Ordering;
use std::fmt;

use super::sq::SQ;
use super::{File, PieceType, Rank};

bitflags! {
    /// Special-move category bits for a [`Move`].
    #[derive(Default)]
    pub struct MoveFlags: u8 {
        const QUIET          = 0b0000_0000;
        const CAPTURE        = 0b0000_0001;
        const DOUBLE_PAWN     = 0b0000_0010;
        const EN_PASSANT      = 0b0000_0100;
        const KING_CASTLE     = 0b0000_1000;
        const QUEEN_CASTLE    = 0b0001_0000;
        const PROMOTION       = 0b0010_0000;
        /// The move, if played, attacks the enemy king directly (not accounting for
        /// discovered checks — see `movegen::gives_check`, which sets this bit).
        const CHECK           = 0b0100_0000;
        /// Set by `Search` once it has confirmed the resulting position has no legal
        /// replies; never set by the generator itself.
        const CHECKMATE       = 0b1000_0000;
    }
}

impl MoveFlags {
    #[inline(always)]
    pub fn is_castle(self) -> bool {
        self.intersects(MoveFlags::KING_CASTLE | MoveFlags::QUEEN_CASTLE)
    }
}

/// A single move, legal only with respect to the position that produced it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Move {
    pub src: SQ,
    pub dst: SQ,
    pub piece: PieceType,
    pub flags: MoveFlags,
    /// The piece captured, if any. `None` for quiet moves and unset for en-passant,
    /// whose captured square differs from `dst` (use [`Move::ep_capture_sq`]).
    pub captured: PieceType,
    /// The promoted-to piece kind, meaningful only when `flags` contains `PROMOTION`.
    pub promoted: PieceType,
}

impl Move {
    /// A sentinel move with identical source and destination squares, used where a
    /// "no move" value is needed (e.g. an empty transposition-table slot).
    pub const NULL: Move = Move {
        src: SQ(0),
        dst: SQ(0),
        piece: PieceType::None,
        flags: MoveFlags::QUIET,
        captured: PieceType::None,
        promoted: PieceType::None,
    };

    #[inline]
    pub fn quiet(src: SQ, dst: SQ, piece: PieceType) -> Move {
        Move {
            src,
            dst,
            piece,
            flags: MoveFlags::QUIET,
            captured: PieceType::None,
            promoted: PieceType::None,
        }
    }

    #[inline]
    pub fn capture(src: SQ, dst: SQ, piece: PieceType, captured: PieceType) -> Move {
        Move {
            src,
            dst,
            piece,
            flags: MoveFlags::CAPTURE,
            captured,
            promoted: PieceType::None,
        }
    }

    #[inline]
    pub fn double_pawn_push(src: SQ, dst: SQ, piece: PieceType) -> Move {
        Move {
            src,
            dst,
            piece,
            flags: MoveFlags::DOUBLE_PAWN,
            captured: PieceType::None,
            promoted: PieceType::None,
        }
    }

    #[inline]
    pub fn en_passant(src: SQ, dst: SQ, piece: PieceType) -> Move {
        Move {
            src,
            dst,
            piece,
            flags: MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
            captured: PieceType::P,
            promoted: PieceType::None,
        }
    }

    #[inline]
    pub fn castle(src: SQ, dst: SQ, king_side: bool) -> Move {
        Move {
            src,
            dst,
            piece: PieceType::K,
            flags: if king_side {
                MoveFlags::KING_CASTLE
            } else {
                MoveFlags::QUEEN_CASTLE
            },
            captured: PieceType::None,
            promoted: PieceType::None,
        }
    }

    #[inline]
    pub fn promotion(src: SQ, dst: SQ, promoted: PieceType, captured: Option<PieceType>) -> Move {
        let mut flags = MoveFlags::PROMOTION;
        if captured.is_some() {
            flags |= MoveFlags::CAPTURE;
        }
        Move {
            src,
            dst,
            piece: PieceType::P,
            flags,
            captured: captured.unwrap_or(PieceType::None),
            promoted,
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.src == self.dst
    }

    #[inline(always)]
    pub fn is_capture(self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline(always)]
    pub fn is_quiet(self) -> bool {
        self.flags == MoveFlags::QUIET
    }

    #[inline(always)]
    pub fn is_promotion(self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }

    #[inline(always)]
    pub fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline(always)]
    pub fn is_castle(self) -> bool {
        self.flags.is_castle()
    }

    #[inline(always)]
    pub fn is_king_castle(self) -> bool {
        self.flags.contains(MoveFlags::KING_CASTLE)
    }

    #[inline(always)]
    pub fn is_queen_castle(self) -> bool {
        self.flags.contains(MoveFlags::QUEEN_CASTLE)
    }

    #[inline(always)]
    pub fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN)
    }

    /// The square of the pawn actually captured by an en-passant move — one rank
    /// behind `dst` from the mover's perspective, not `dst` itself.
    #[inline]
    pub fn ep_capture_sq(self) -> SQ {
        debug_assert!(self.is_en_passant());
        if self.dst.rank() == Rank::R6 {
            SQ(self.dst.0 - 8)
        } else {
            SQ(self.dst.0 + 8)
        }
    }

    pub fn dest_row(self) -> Rank {
        self.dst.rank()
    }

    pub fn dest_col(self) -> File {
        self.dst.file()
    }

    pub fn src_row(self) -> Rank {
        self.src.rank()
    }

    pub fn src_col(self) -> File {
        self.src.file()
    }

    /// Long algebraic notation, e.g. `"e2e4"` or `"a7a8q"` for a queen promotion.
    pub fn stringify(self) -> String {
        let dst = if self.is_castle() {
            match self.dst {
                SQ::A8 => "c8".to_string(),
                SQ::A1 => "c1".to_string(),
                SQ::H8 => "g8".to_string(),
                SQ::H1 => "g1".to_string(),
                other => other.to_string(),
            }
        } else {
            self.dst.to_string()
        };
        let mut s = format!("{}{}", self.src, dst);
        if self.is_promotion() {
            s.push(self.promoted.char_lower());
        }
        s
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

/// A move paired with a search-assigned ordering score.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScoringMove {
    pub mv: Move,
    pub score: i32,
}

impl ScoringMove {
    #[inline(always)]
    pub fn new(mv: Move) -> Self {
        ScoringMove { mv, score: 0 }
    }

    #[inline(always)]
    pub fn new_score(mv: Move, score: i32) -> Self {
        ScoringMove { mv, score }
    }
}

impl PartialEq for ScoringMove {
    fn eq(&self, other: &ScoringMove) -> bool {
        self.score == other.score
    }
}

impl Eq for ScoringMove {}

impl PartialOrd for ScoringMove {
    fn partial_cmp(&self, other: &ScoringMove) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoringMove {
    fn cmp(&self, other: &ScoringMove) -> Ordering {
        self.score.cmp(&other.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_move_round_trips_notation() {
        let mv = Move::quiet(SQ::E2, SQ::E4, PieceType::P);
        assert_eq!(mv.stringify(), "e2e4");
        assert!(mv.is_quiet());
        assert!(!mv.is_capture());
    }

    #[test]
    fn promotion_notation_includes_piece() {
        let mv = Move::promotion(SQ::A7, SQ::A8, PieceType::Q, None);
        assert_eq!(mv.stringify(), "a7a8q");
        assert!(mv.is_promotion());
        assert!(!mv.is_capture());
    }

    #[test]
    fn castle_notation_uses_king_destination() {
        let mv = Move::castle(SQ::E1, SQ::H1, true);
        assert_eq!(mv.stringify(), "e1g1");
    }

    #[test]
    fn en_passant_capture_square_is_behind_destination() {
        let mv = Move::en_passant(SQ::E5, SQ::D6, PieceType::P);
        assert_eq!(mv.ep_capture_sq(), SQ::D5);
    }

    #[test]
    fn null_move_has_equal_src_and_dst() {
        assert!(Move::NULL.is_null());
        assert!(!Move::quiet(SQ::A1, SQ::A2, PieceType::P).is_null());
    }
}
