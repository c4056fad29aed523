//! A `Vec`-backed list of [`RootMove`]s, shared (read-mostly) between workers searching
//! the same root position.

use std::ops::{Deref, DerefMut};

use chess_core::{Move, MoveList, PieceType, Position};

use super::RootMove;

#[derive(Clone, Default)]
pub struct RootMoveList {
    moves: Vec<RootMove>,
}

impl RootMoveList {
    pub fn new() -> Self {
        RootMoveList { moves: Vec::new() }
    }

    /// Replaces the current moves with those in `list`, each starting with a fresh score.
    pub fn replace(&mut self, list: &MoveList) {
        self.moves = list.iter().map(|&mv| RootMove::new(mv)).collect();
    }

    /// Applies [`RootMove::rollback`] to every entry, ahead of the next iterative-deepening
    /// pass.
    pub fn rollback(&mut self) {
        self.moves.iter_mut().for_each(RootMove::rollback);
    }

    /// Orders moves by captures (most valuable victim, least valuable attacker first),
    /// castles, then quiets, used to seed move ordering before any search has run.
    pub fn mvv_lva_sort(&mut self, pos: &Position) {
        self.moves.sort_by_key(|root_move| {
            let mv = root_move.mv;
            let piece = mv.piece;
            if mv.is_capture() {
                (piece.value() as i32) - (mv.captured.value() as i32)
            } else if mv.is_castle() {
                1
            } else if piece == PieceType::P {
                2
            } else {
                3
            }
        });
        let _ = pos;
    }

    /// Stable sort by best-known score, highest first, used after a completed search.
    pub fn sort_by_score(&mut self) {
        self.moves.sort();
    }

    /// The best move's score from the previous completed iteration.
    pub fn prev_best_score(&self) -> i32 {
        self.moves.first().map(|m| m.prev_score).unwrap_or(super::MIN_SCORE)
    }

    pub fn to_move_list(&self) -> Vec<Move> {
        self.moves.iter().map(|m| m.mv).collect()
    }
}

impl Deref for RootMoveList {
    type Target = [RootMove];

    fn deref(&self) -> &[RootMove] {
        &self.moves
    }
}

impl DerefMut for RootMoveList {
    fn deref_mut(&mut self) -> &mut [RootMove] {
        &mut self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Position;

    #[test]
    fn replace_seeds_every_legal_move() {
        let pos = Position::start_pos();
        let legal: MoveList = pos.generate_moves();
        let mut list = RootMoveList::new();
        list.replace(&legal);
        assert_eq!(list.len(), legal.len());
    }

    #[test]
    fn sort_by_score_orders_descending() {
        let mut list = RootMoveList::new();
        let pos = Position::start_pos();
        let legal: MoveList = pos.generate_moves();
        list.replace(&legal);
        list[0].insert(10, 1);
        list[1].insert(50, 1);
        list.sort_by_score();
        assert!(list[0].score >= list[1].score);
    }
}
