//! Position evaluation and its supporting pseudo-random number generator.
//!
//! The transposition table and search-facing prefetch hints live in `chess_engine`,
//! which actually runs a search; this crate only needs randomness (for Zobrist keys and
//! magic-number search) and the static evaluator.

pub mod eval;
pub mod prng;
