//! The top-level `Engine`: owns the position under analysis, the shared transposition
//! table, and the worker registry a search splits across. This is the seam a UCI
//! front-end (out of scope here) would sit behind.

use std::sync::Arc;

use chess_core::{Move, Position};

use crate::error::EngineError;
use crate::options::EngineOptions;
use crate::search::{Search, SearchResult};
use crate::sync::LockLatch;
use crate::tt::TranspositionTable;
use crate::ybwc::WorkerRegistry;

pub static ID_NAME: &str = "chess_engine";
pub static VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owns everything one line of play needs: the position, the options that govern how
/// deep/wide a search may go, and the shared state a search run is built on top of.
pub struct Engine {
    position: Position,
    options: EngineOptions,
    search: Search,
    searching: LockLatch,
}

impl Engine {
    /// Builds an engine at the starting position with default options.
    pub fn new() -> Engine {
        Engine::with_options(EngineOptions::default()).expect("default options are always valid")
    }

    pub fn with_options(options: EngineOptions) -> Result<Engine, EngineError> {
        options.validate()?;
        let tt = Arc::new(TranspositionTable::new(options.tt_size_mb));
        let registry = Arc::new(WorkerRegistry::new(options.max_threads));
        Ok(Engine {
            position: Position::start_pos(),
            options,
            search: Search::new(tt, registry),
            searching: LockLatch::new(),
        })
    }

    /// Replaces the position under analysis with the one described by `fen`.
    pub fn position_from_fen(&mut self, fen: &str) -> Result<(), EngineError> {
        self.position = Position::from_fen(fen)?;
        Ok(())
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Every legal move from the current position, in no particular order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.generate_moves().vec()
    }

    /// Applies `mv` to the current position. Rejects a move that isn't legal here
    /// rather than mutating the board with it, per the engine's illegal-move contract.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), EngineError> {
        if !self.legal_moves().contains(&mv) {
            return Err(EngineError::IllegalMove {
                mv: mv.stringify(),
            });
        }
        self.position.make_move(mv);
        Ok(())
    }

    /// Applies the move named by its UCI long-algebraic string (e.g. `"e2e4"`,
    /// `"e7e8q"`), looking it up among the current position's legal moves.
    pub fn apply_uci_move(&mut self, uci_move: &str) -> Result<(), EngineError> {
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.stringify() == uci_move)
            .ok_or_else(|| EngineError::IllegalMove {
                mv: uci_move.to_string(),
            })?;
        self.position.make_move(mv);
        Ok(())
    }

    /// Runs a search from the current position to `self.options().max_depth`, blocking
    /// until it completes. Only one search may run at a time; this panics if called
    /// while another is already in flight.
    pub fn search(&self) -> SearchResult {
        self.searching.set();
        let result = self.search.run(&self.position, self.options.max_depth);
        self.searching.lock();
        result
    }

    /// Asks a concurrently-running `search()` call to stop at its next checkpoint.
    pub fn stop_search(&self) {
        self.search.request_stop();
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Rebuilds the transposition table and worker registry from `options`, discarding
    /// whatever the old table held.
    pub fn set_options(&mut self, options: EngineOptions) -> Result<(), EngineError> {
        options.validate()?;
        let tt = Arc::new(TranspositionTable::new(options.tt_size_mb));
        let registry = Arc::new(WorkerRegistry::new(options.max_threads));
        self.search = Search::new(tt, registry);
        self.options = options;
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}
