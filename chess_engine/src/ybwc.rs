//! Work-stealing parallel search: the "Young Brothers Wait" concept (YBWC).
//!
//! A search [`Node`] searches its first move sequentially (the "young brother" waits),
//! then, once that move has returned a score, may offer its remaining sibling moves to
//! other workers rather than search them all on one thread. This module is grounded in
//! `engine/include/engine/ybwc.hpp` and `engine/src/ybwc.cpp`'s `Task`/`Node`/`TaskStack`
//! split: there a `TaskStack` holds idle OS threads that a `Node` wakes with a move to
//! search and puts back to sleep when done.
//!
//! This is the scoped-thread analogue of that design: [`WorkerRegistry`] hands out
//! permits bounding how many scoped slave threads may run at once (standing in for the
//! idle-thread stack), and [`NodeShared`] is the `Node`'s shared alpha/best-move/stop
//! state, mutated only under its own lock. Rather than the teacher's literal
//! ancestor-chain helper-stealing (an idle master parks itself as a helper on a
//! descendant node while waiting on its own slaves), slave threads here are spawned with
//! `crossbeam_utils::thread::scope` and simply pull moves from a shared queue until it
//! empties or the node's stop flag is set; see DESIGN.md for why this trade is made.

use std::sync::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use chess_core::Move;

/// Minimum depth at which a node may offer its remaining moves for parallel search;
/// below this the cost of spawning a slave thread outweighs any benefit.
pub const SPLIT_MIN_DEPTH: u8 = 6;

/// Maximum concurrent slave threads a single node may have searching its moves.
pub const SPLIT_MAX_SLAVES: usize = 3;

/// Bounds how many worker slots the whole search may have in flight at once. Acts as
/// the scoped-thread stand-in for the teacher's `TaskStack` of idle pre-spawned threads.
pub struct WorkerRegistry {
    idle: Mutex<usize>,
    cv: Condvar,
    capacity: usize,
}

impl WorkerRegistry {
    pub fn new(capacity: usize) -> WorkerRegistry {
        WorkerRegistry {
            idle: Mutex::new(capacity),
            cv: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Claims up to `max` permits without blocking, returning as many as were
    /// available. An empty result is never an error: the caller falls back to
    /// searching its remaining moves sequentially.
    pub fn try_acquire_up_to(&self, max: usize) -> Vec<WorkerPermit<'_>> {
        let mut idle = self.idle.lock().unwrap();
        let n = (*idle).min(max);
        *idle -= n;
        (0..n).map(|_| WorkerPermit { registry: self }).collect()
    }

    fn release_one(&self) {
        let mut idle = self.idle.lock().unwrap();
        *idle += 1;
        self.cv.notify_one();
    }
}

/// A claimed worker slot; releases back to the registry on drop, regardless of whether
/// the slave thread it backed finished normally or unwound.
pub struct WorkerPermit<'a> {
    registry: &'a WorkerRegistry,
}

impl<'a> Drop for WorkerPermit<'a> {
    fn drop(&mut self) {
        self.registry.release_one();
    }
}

/// Shared state for one interior node's still-unsearched moves. Every slave searching a
/// move belonging to this node folds its result in through [`NodeShared::update`], which
/// also detects and latches the beta cutoff that tells siblings to stop.
pub struct NodeShared {
    alpha: Mutex<i32>,
    pub beta: i32,
    best_move: Mutex<Move>,
    stop: AtomicBool,
}

impl NodeShared {
    pub fn new(alpha: i32, beta: i32) -> NodeShared {
        NodeShared {
            alpha: Mutex::new(alpha),
            beta,
            best_move: Mutex::new(Move::NULL),
            stop: AtomicBool::new(false),
        }
    }

    pub fn alpha(&self) -> i32 {
        *self.alpha.lock().unwrap()
    }

    pub fn best_move(&self) -> Move {
        *self.best_move.lock().unwrap()
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Folds a child's search result into the node's shared state. If `score` raises
    /// alpha, records the new alpha and best move; if alpha then meets or exceeds beta,
    /// latches the stop flag so sibling slaves abandon their own searches.
    pub fn update(&self, mv: Move, score: i32) {
        let mut alpha = self.alpha.lock().unwrap();
        if score > *alpha {
            *alpha = score;
            *self.best_move.lock().unwrap() = mv;
        }
        if *alpha >= self.beta {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}

/// Whether a node at `depth`, having already searched one move sequentially, should
/// offer its `moves_remaining` untried siblings for parallel search.
pub fn should_split(depth: u8, moves_searched: usize, moves_remaining: usize) -> bool {
    depth >= SPLIT_MIN_DEPTH && moves_searched >= 1 && moves_remaining >= 1
}
