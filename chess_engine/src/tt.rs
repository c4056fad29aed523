//! Transposition table: a fixed-capacity, power-of-two array mapping Zobrist hashes to
//! previously-computed search results, shared by every search worker.
//!
//! Unlike the cluster-of-entries scheme this is adapted from, each slot here holds exactly
//! one entry guarded by its own spin-lock, so `Add` and `Probe` never contend on anything
//! bigger than the slot a single hash maps to.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chess_core::{Move, Position};

const BYTES_PER_MB: usize = 1_000_000;

/// The kind of bound a stored score represents, per the node type it was found at.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NodeBound {
    /// CUT node: score is a lower bound (beta cutoff occurred).
    Cut,
    /// ALL node: score is an upper bound (no move raised alpha).
    All,
    /// PV node: score is exact.
    Pv,
}

/// A single transposition-table record.
#[derive(Copy, Clone, Debug)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub best_move: Move,
    pub bound: NodeBound,
    /// Half-move clock of the position at the time this entry was written, used to prefer
    /// fresher entries over stale ones from an earlier, unrelated search.
    pub age: u16,
}

impl TTEntry {
    const EMPTY: TTEntry = TTEntry {
        hash: EMPTY_HASH,
        depth: 0,
        score: 0,
        best_move: Move::NULL,
        bound: NodeBound::All,
        age: 0,
    };
}

/// Sentinel hash written into cleared slots; real Zobrist hashes colliding with it are
/// astronomically unlikely and harmless even if they occur (a spurious probe miss).
const EMPTY_HASH: u64 = u64::MAX;

/// One slot of the table: a spin-locked entry.
struct Slot {
    lock: AtomicBool,
    hash: AtomicU64,
    entry: std::cell::UnsafeCell<TTEntry>,
}

// SAFETY: every read/write of `entry` happens while `lock` is held (see `with_lock`), and
// `hash` is additionally kept in its own atomic so `probe` can peek at it without locking.
unsafe impl Sync for Slot {}

impl Slot {
    fn new() -> Slot {
        Slot {
            lock: AtomicBool::new(false),
            hash: AtomicU64::new(EMPTY_HASH),
            entry: std::cell::UnsafeCell::new(TTEntry::EMPTY),
        }
    }

    fn acquire(&self) {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
    }

    fn release(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// Runs `f` with exclusive access to the slot's entry, keeping `hash` in sync.
    fn with_lock<R>(&self, f: impl FnOnce(&mut TTEntry) -> R) -> R {
        self.acquire();
        let result = unsafe {
            let entry = &mut *self.entry.get();
            let result = f(entry);
            self.hash.store(entry.hash, Ordering::Relaxed);
            result
        };
        self.release();
        result
    }

    /// Snapshot read of the slot's entry under its spin-lock. `probe` already rules out
    /// most misses with a lock-free peek at `hash` first, so this is only reached when
    /// that fast check passes; callers still re-check `hash` against what they expect
    /// before trusting the result, since the slot may have been overwritten by a
    /// different position hashing to the same index between the two checks.
    fn peek(&self) -> TTEntry {
        self.acquire();
        let entry = unsafe { *self.entry.get() };
        self.release();
        entry
    }
}

/// The shared transposition table.
pub struct TranspositionTable {
    slots: Vec<Slot>,
    mask: u64,
}

/// Outcome of a [`TranspositionTable::cutoff`] query.
pub struct CutoffResult {
    pub hit: bool,
    pub best_move: Move,
    pub score: i32,
}

impl TranspositionTable {
    /// Builds a table sized to roughly `mb_size` megabytes, rounded down to the nearest
    /// power-of-two number of slots.
    pub fn new(mb_size: usize) -> TranspositionTable {
        let slot_bytes = std::mem::size_of::<Slot>();
        let requested = ((mb_size.max(1) * BYTES_PER_MB) / slot_bytes).max(1);
        TranspositionTable::with_capacity(requested.next_power_of_two())
    }

    fn with_capacity(capacity: usize) -> TranspositionTable {
        assert!(capacity.is_power_of_two());
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::new);
        TranspositionTable {
            slots,
            mask: (capacity - 1) as u64,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn size_megabytes(&self) -> usize {
        (self.slots.len() * std::mem::size_of::<Slot>()) / BYTES_PER_MB
    }

    /// Rebuilds the table at a new power-of-two capacity (nearest to `mb_size` megabytes).
    /// All existing entries are discarded; no rehashing is attempted.
    pub fn resize_to_megabytes(&mut self, mb_size: usize) {
        *self = TranspositionTable::new(mb_size);
    }

    /// Writes the empty sentinel into every slot without reallocating.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.with_lock(|entry| *entry = TTEntry::EMPTY);
        }
    }

    /// Stores a search result, replacing the existing entry only if the new one was found
    /// at greater depth, or the existing entry is from a strictly earlier position (an
    /// older half-move clock) than the one being written now.
    pub fn add(&self, pos: &Position, depth: u8, score: i32, best_move: Move, bound: NodeBound) {
        let hash = pos.hash();
        let age = pos.half_move_clock();
        let slot = &self.slots[self.index(hash)];
        slot.with_lock(|entry| {
            let replace = depth > entry.depth || entry.age < age;
            if !replace {
                return;
            }
            *entry = TTEntry {
                hash,
                depth,
                score,
                best_move,
                bound,
                age,
            };
        });
    }

    /// Returns a copy of the slot's entry if its hash matches. A lock-free read of the
    /// slot's atomic `hash` rejects most misses before the locked snapshot in `peek` is
    /// ever taken.
    pub fn probe(&self, pos: &Position) -> Option<TTEntry> {
        let hash = pos.hash();
        let slot = &self.slots[self.index(hash)];
        if slot.hash.load(Ordering::Relaxed) != hash {
            return None;
        }
        let entry = slot.peek();
        if entry.hash == hash {
            Some(entry)
        } else {
            None
        }
    }

    /// Attempts a search cutoff at `(depth, alpha, beta)`. Always returns the stored best
    /// move (for move ordering) when there is a hash hit, but only signals `hit: true`
    /// (meaning the score itself can be trusted as a cutoff) when the stored depth covers
    /// the requested depth and the bound type actually licenses a cutoff at this window.
    pub fn cutoff(&self, pos: &Position, depth: u8, alpha: i32, beta: i32) -> CutoffResult {
        match self.probe(pos) {
            None => CutoffResult {
                hit: false,
                best_move: Move::NULL,
                score: 0,
            },
            Some(entry) => {
                let licenses_cutoff = entry.depth >= depth
                    && match entry.bound {
                        NodeBound::Pv => true,
                        NodeBound::Cut => entry.score >= beta,
                        NodeBound::All => entry.score < alpha,
                    };
                CutoffResult {
                    hit: licenses_cutoff,
                    best_move: entry.best_move,
                    score: entry.score,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Position;

    #[test]
    fn capacity_rounds_to_power_of_two() {
        let tt = TranspositionTable::with_capacity(64);
        assert_eq!(tt.capacity(), 64);
    }

    #[test]
    fn probe_misses_on_empty_table() {
        let tt = TranspositionTable::new(1);
        let pos = Position::start_pos();
        assert!(tt.probe(&pos).is_none());
    }

    #[test]
    fn add_then_probe_round_trips() {
        let tt = TranspositionTable::new(1);
        let pos = Position::start_pos();
        let mv = Move::quiet(
            chess_core::SQ(12),
            chess_core::SQ(28),
            chess_core::PieceType::P,
        );
        tt.add(&pos, 4, 37, mv, NodeBound::Pv);
        let entry = tt.probe(&pos).expect("entry should be present");
        assert_eq!(entry.depth, 4);
        assert_eq!(entry.score, 37);
        assert_eq!(entry.best_move, mv);
    }

    #[test]
    fn cutoff_respects_bound_type() {
        let tt = TranspositionTable::new(1);
        let pos = Position::start_pos();
        let mv = Move::NULL;
        tt.add(&pos, 6, 100, mv, NodeBound::Cut);
        let result = tt.cutoff(&pos, 4, 0, 50);
        assert!(result.hit);
        assert_eq!(result.score, 100);

        let result = tt.cutoff(&pos, 4, 0, 150);
        assert!(!result.hit);
    }

    #[test]
    fn shallower_entry_does_not_replace_deeper_one() {
        let tt = TranspositionTable::new(1);
        let pos = Position::start_pos();
        tt.add(&pos, 8, 10, Move::NULL, NodeBound::Pv);
        tt.add(&pos, 2, 999, Move::NULL, NodeBound::Pv);
        let entry = tt.probe(&pos).unwrap();
        assert_eq!(entry.depth, 8);
        assert_eq!(entry.score, 10);
    }

    #[test]
    fn clear_empties_every_slot() {
        let tt = TranspositionTable::new(1);
        let pos = Position::start_pos();
        tt.add(&pos, 5, 1, Move::NULL, NodeBound::Pv);
        tt.clear();
        assert!(tt.probe(&pos).is_none());
    }
}
