//! A parallel alpha-beta chess search engine built on the `chess_core` board and
//! evaluation library.
//!
//! This crate is the search/engine layer: move generation, board representation, and
//! evaluation live in `chess_core`; this crate adds the transposition table, the
//! iterative-deepening PVS search, the YBWC work-stealing split, and the `Engine` that
//! ties them to a position under analysis. It is not intended as a library dependency
//! for other crates, only as a direct executable and its own integration tests.

#![allow(dead_code)]

pub mod consts;
pub mod engine;
pub mod error;
pub mod options;
pub mod root_moves;
pub mod search;
pub mod sync;
pub mod tt;
pub mod ybwc;

pub use consts::*;
pub use engine::Engine;
pub use error::EngineError;
