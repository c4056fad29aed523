//! Iterative-deepening principal-variation search (PVS) with alpha-beta pruning and
//! optional YBWC parallel splitting at interior nodes.
//!
//! A [`Search`] is a cheap, `Clone`-able handle: every field is an `Arc`, so a slave
//! thread spawned while splitting a node gets its own handle to the same transposition
//! table and worker registry without any unsafe sharing. The recursive descent is
//! generic over [`PV`]/[`NonPV`] (see `crate::consts`) so the "first move gets a full
//! window, the rest get a null-window probe with a PV re-search on fail-high" branch of
//! classical PVS is resolved at compile time rather than re-checked on every node.
//!
//! No late-move reductions, null-move pruning, razoring, futility pruning, singular
//! extensions, or history-heuristic move ordering: this search orders by hash move, then
//! captures (most valuable victim first), then moves into the enemy king's ring, then
//! everything else, and searches every move to full depth.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chess_core::tools::eval::Eval;
use chess_core::{BitBoard, Move, MoveList, Position};

use crate::consts::{NonPV, PVNode, PV};
use crate::root_moves::root_moves_list::RootMoveList;
use crate::root_moves::{MAX_SCORE, MIN_SCORE};
use crate::tt::{NodeBound, TranspositionTable};
use crate::ybwc::{should_split, NodeShared, WorkerRegistry};

const MATE_SCORE: i32 = 30_000;
const DRAW_SCORE: i32 = 0;

/// The principal variation and bookkeeping produced by one [`Search::run`] call.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub pv: Vec<Move>,
    pub depth: u8,
    pub nodes: u64,
}

/// A search context shared (via `Arc`) between the master thread and every slave it
/// spawns while splitting a node. Holds no position of its own; every call takes a
/// `&mut Position`/`&Position` and leaves it exactly as found (every `make_move` is
/// paired with an `undo_move`).
#[derive(Clone)]
pub struct Search {
    tt: Arc<TranspositionTable>,
    registry: Arc<WorkerRegistry>,
    nodes: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
}

impl Search {
    pub fn new(tt: Arc<TranspositionTable>, registry: Arc<WorkerRegistry>) -> Search {
        Search {
            tt,
            registry,
            nodes: Arc::new(AtomicU64::new(0)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Asks every in-flight search (this thread and any slaves) to return as soon as
    /// they next check in.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Runs iterative deepening from `root` up to `max_depth` plies, returning the best
    /// line found at the deepest completed iteration.
    pub fn run(&self, root: &Position, max_depth: u8) -> SearchResult {
        self.stop.store(false, Ordering::Relaxed);
        self.nodes.store(0, Ordering::Relaxed);

        let mut pos = root.clone();
        let legal = pos.generate_moves();
        if legal.is_empty() {
            let score = if pos.in_check() { -MATE_SCORE } else { DRAW_SCORE };
            return SearchResult {
                best_move: Move::NULL,
                score,
                pv: Vec::new(),
                depth: 0,
                nodes: 0,
            };
        }

        let mut root_moves = RootMoveList::new();
        root_moves.replace(&legal);
        root_moves.mvv_lva_sort(&pos);

        let mut result = SearchResult {
            best_move: root_moves[0].mv,
            score: 0,
            pv: vec![root_moves[0].mv],
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth {
            if self.should_stop() {
                break;
            }
            root_moves.rollback();
            self.search_root_depth(&mut pos, &mut root_moves, depth);
            root_moves.sort_by_score();

            result.best_move = root_moves[0].mv;
            result.score = root_moves[0].score;
            result.depth = depth;
            result.pv = self.extract_pv(&mut pos, result.best_move, depth);
        }

        result.nodes = self.nodes.load(Ordering::Relaxed);
        result
    }

    fn search_root_depth(&self, pos: &mut Position, root_moves: &mut RootMoveList, depth: u8) {
        let moves = root_moves.to_move_list();
        let node = NodeShared::new(MIN_SCORE, MAX_SCORE);

        let mv0 = moves[0];
        pos.make_move(mv0);
        let score0 = -self.pvs::<PV>(pos, depth.saturating_sub(1), MIN_SCORE, MAX_SCORE, 1);
        pos.undo_move(mv0);
        node.update(mv0, score0);
        if let Some(rm) = root_moves.iter_mut().find(|rm| rm.mv == mv0) {
            rm.insert(score0, depth as u16);
        }

        for &mv in &moves[1..] {
            if self.should_stop() || node.should_stop() {
                break;
            }
            let score = self.search_one_child::<PV>(pos, mv, depth, &node, 1);
            if let Some(rm) = root_moves.iter_mut().find(|rm| rm.mv == mv) {
                rm.insert(score, depth as u16);
            }
        }
    }

    /// Recursive alpha-beta PVS. `N` fixes whether this call is searching a PV (full
    /// window, exact-score-expected) node or a non-PV (null-window, cutoff-test-only)
    /// node.
    fn pvs<N: PVNode>(&self, pos: &mut Position, depth: u8, alpha_in: i32, beta: i32, ply: u16) -> i32 {
        if self.should_stop() {
            return alpha_in;
        }
        if depth == 0 {
            return self.quiescence(pos, alpha_in, beta);
        }
        if ply > 0 && pos.half_move_clock() >= 100 {
            return DRAW_SCORE;
        }

        self.nodes.fetch_add(1, Ordering::Relaxed);

        let cutoff = self.tt.cutoff(pos, depth, alpha_in, beta);
        if cutoff.hit {
            return cutoff.score;
        }

        let mut moves = pos.generate_moves();
        if moves.is_empty() {
            return if pos.in_check() {
                -(MATE_SCORE - ply as i32)
            } else {
                DRAW_SCORE
            };
        }
        order_moves(pos, &mut moves, cutoff.best_move);

        let node = NodeShared::new(alpha_in, beta);

        let mv0 = moves[0];
        pos.make_move(mv0);
        let score0 = if N::is_pv() {
            -self.pvs::<PV>(pos, depth - 1, -beta, -node.alpha(), ply + 1)
        } else {
            -self.pvs::<NonPV>(pos, depth - 1, -beta, -alpha_in, ply + 1)
        };
        pos.undo_move(mv0);
        node.update(mv0, score0);

        if !node.should_stop() && moves.len() > 1 {
            let remaining: Vec<Move> = moves.as_slice()[1..].to_vec();
            if should_split(depth, 1, remaining.len()) {
                self.search_split::<N>(pos, depth, &node, remaining, ply + 1);
            } else {
                for mv in remaining {
                    if self.should_stop() || node.should_stop() {
                        break;
                    }
                    self.search_one_child::<N>(pos, mv, depth, &node, ply + 1);
                }
            }
        }

        let best_score = node.alpha();
        let bound = if best_score >= beta {
            NodeBound::Cut
        } else if best_score > alpha_in {
            NodeBound::Pv
        } else {
            NodeBound::All
        };
        self.tt.add(pos, depth, best_score, node.best_move(), bound);
        best_score
    }

    /// Searches one child of `node`: a null-window probe, promoted to a full-window
    /// PV re-search if it lands strictly inside `(alpha, beta)` and the parent is a PV
    /// node. Folds the result into `node` and returns it.
    fn search_one_child<N: PVNode>(&self, pos: &mut Position, mv: Move, depth: u8, node: &NodeShared, ply: u16) -> i32 {
        pos.make_move(mv);
        let alpha = node.alpha();
        let beta = node.beta;
        let mut score = -self.pvs::<NonPV>(pos, depth - 1, -alpha - 1, -alpha, ply);
        if N::is_pv() && score > alpha && score < beta {
            score = -self.pvs::<PV>(pos, depth - 1, -beta, -score, ply);
        }
        pos.undo_move(mv);
        node.update(mv, score);
        score
    }

    /// Offers `remaining` to up to `SPLIT_MAX_SLAVES` scoped threads pulled from the
    /// shared worker registry. Falls back to a sequential loop if no permits are free;
    /// that is never an error, just less parallel.
    fn search_split<N: PVNode>(&self, pos: &Position, depth: u8, node: &NodeShared, remaining: Vec<Move>, ply: u16) {
        let permits = self.registry.try_acquire_up_to(crate::ybwc::SPLIT_MAX_SLAVES);
        if permits.is_empty() {
            let mut local = pos.clone();
            for mv in remaining {
                if self.should_stop() || node.should_stop() {
                    break;
                }
                self.search_one_child::<N>(&mut local, mv, depth, node, ply);
            }
            return;
        }

        let base = pos.clone();
        let queue = std::sync::Mutex::new(remaining);
        let outcome = crossbeam_utils::thread::scope(|scope| {
            for _permit in &permits {
                scope.spawn(|_| loop {
                    if self.should_stop() || node.should_stop() {
                        break;
                    }
                    let next = {
                        let mut q = queue.lock().unwrap();
                        q.pop()
                    };
                    match next {
                        Some(mv) => {
                            let mut local = base.clone();
                            self.search_one_child::<N>(&mut local, mv, depth, node, ply);
                        }
                        None => break,
                    }
                });
            }
        });
        outcome.expect("ybwc slave thread panicked");
    }

    fn quiescence(&self, pos: &mut Position, mut alpha: i32, beta: i32) -> i32 {
        if self.should_stop() {
            return alpha;
        }
        self.nodes.fetch_add(1, Ordering::Relaxed);

        let stand_pat = Eval::eval(pos) as i32;
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = pos.generate_captures();
        order_moves(pos, &mut captures, Move::NULL);
        for mv in captures {
            pos.make_move(mv);
            let score = -self.quiescence(pos, -beta, -alpha);
            pos.undo_move(mv);
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Walks the transposition table's recorded best moves starting from `first`, up to
    /// `max_len` plies, to recover the line the root score was reported for.
    fn extract_pv(&self, pos: &mut Position, first: Move, max_len: u8) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut mv = first;
        while !mv.is_null() && pv.len() < max_len as usize {
            if !pos.generate_moves().as_slice().contains(&mv) {
                break;
            }
            pos.make_move(mv);
            pv.push(mv);
            mv = match self.tt.probe(pos) {
                Some(entry) => entry.best_move,
                None => Move::NULL,
            };
        }
        for &played in pv.iter().rev() {
            pos.undo_move(played);
        }
        pv
    }
}

/// Orders `moves` in place: the hash move first, then captures (most valuable victim,
/// least valuable attacker first), then moves landing in the enemy king's ring, then
/// everything else.
fn order_moves(pos: &Position, moves: &mut MoveList, hash_move: Move) {
    let enemy_king = pos.king_sq(!pos.turn());
    let ring = chess_core::helper::prelude::king_moves(enemy_king);
    moves
        .as_mut_slice()
        .sort_by_key(|&mv| std::cmp::Reverse(move_order_key(mv, hash_move, ring)));
}

fn move_order_key(mv: Move, hash_move: Move, king_ring: BitBoard) -> i32 {
    if !hash_move.is_null() && mv == hash_move {
        return i32::MAX;
    }
    if mv.is_capture() {
        return 10_000 + (mv.captured.value() as i32) * 10 - mv.piece.value() as i32;
    }
    if (mv.dst.to_bb() & king_ring).is_not_empty() {
        return 1_000;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ybwc::WorkerRegistry;
    use std::sync::Arc;

    fn fresh_search() -> Search {
        Search::new(
            Arc::new(TranspositionTable::new(1)),
            Arc::new(WorkerRegistry::new(1)),
        )
    }

    #[test]
    fn finds_mate_in_one() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let search = fresh_search();
        let result = search.run(&pos, 3);
        assert!(!result.best_move.is_null());
        assert!(result.score > 9_000, "expected a mate score, got {}", result.score);
    }

    #[test]
    fn depth_one_search_returns_a_legal_move() {
        let pos = Position::start_pos();
        let search = fresh_search();
        let result = search.run(&pos, 1);
        let legal = pos.generate_moves();
        assert!(legal.as_slice().contains(&result.best_move));
    }

    #[test]
    fn pv_starts_with_the_best_move() {
        let pos = Position::start_pos();
        let search = fresh_search();
        let result = search.run(&pos, 2);
        assert_eq!(result.pv.first().copied(), Some(result.best_move));
    }
}
