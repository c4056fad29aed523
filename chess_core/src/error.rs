//! The engine-wide error type.
//!
//! Every fallible public entry point across `chess_core` and `chess_engine` returns
//! `Result<T, EngineError>`, so FEN parsing, move application, and configuration
//! validation all report failures through one enum rather than each module growing its
//! own bespoke error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid fen: {reason}")]
    InvalidFen { reason: String },
    #[error("illegal move: {mv}")]
    IllegalMove { mv: String },
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
