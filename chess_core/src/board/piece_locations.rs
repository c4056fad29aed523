//! Maps each square of the board to the piece (if any) occupying it.
//!
//! This is the mailbox half of the board representation (SPEC_FULL.md §3): a
//! redundant-but-consistent inverse of the per-color piece bitboards, kept in sync on
//! every make/undo so that "what's on e4" is an array lookup rather than a scan over
//! twelve bitboards.

use crate::core::sq::SQ;
use crate::core::{Piece, PieceType, Player};

/// Square-indexed piece lookup. `Piece::None` marks an empty square.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PieceLocations {
    data: [Piece; 64],
}

impl PieceLocations {
    /// A board with no pieces on it.
    pub const fn blank() -> PieceLocations {
        PieceLocations {
            data: [Piece::None; 64],
        }
    }

    /// Places a piece at `square`, overwriting whatever was there.
    #[inline]
    pub fn place(&mut self, square: SQ, player: Player, piece_type: PieceType) {
        debug_assert!(square.is_okay());
        self.data[square.0 as usize] = Piece::make_lossy(player, piece_type);
    }

    /// Clears a square.
    #[inline]
    pub fn remove(&mut self, square: SQ) {
        debug_assert!(square.is_okay());
        self.data[square.0 as usize] = Piece::None;
    }

    /// The piece kind at `square`, ignoring color.
    #[inline]
    pub fn piece_type_at(&self, square: SQ) -> PieceType {
        debug_assert!(square.is_okay());
        self.data[square.0 as usize].type_of()
    }

    /// The piece at `square`, or `Piece::None` if empty.
    #[inline]
    pub fn piece_at(&self, square: SQ) -> Piece {
        debug_assert!(square.is_okay());
        self.data[square.0 as usize]
    }

    /// The piece at `square` for the given player, or `None` if empty or the wrong color.
    #[inline]
    pub fn piece_at_for_player(&self, square: SQ, player: Player) -> Option<PieceType> {
        let p = self.piece_at(square);
        if p.player() == Some(player) {
            Some(p.type_of())
        } else {
            None
        }
    }

    /// The player occupying `square`, if any.
    #[inline]
    pub fn player_at(&self, square: SQ) -> Option<Player> {
        self.piece_at(square).player()
    }

    /// Whether `square` is occupied.
    #[inline]
    pub fn at_square(&self, square: SQ) -> bool {
        self.piece_at(square) != Piece::None
    }

    /// The first square (lowest index) holding a given player's piece kind, if any.
    pub fn first_square(&self, piece_type: PieceType, player: Player) -> Option<SQ> {
        let target = Piece::make_lossy(player, piece_type);
        (0..64u8).find(|&s| self.data[s as usize] == target).map(SQ)
    }
}

impl Default for PieceLocations {
    fn default() -> Self {
        PieceLocations::blank()
    }
}
