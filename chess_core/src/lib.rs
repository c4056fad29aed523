//! Board representation, move generation, and position evaluation for a parallel chess
//! engine: bitboard piece placement, single-pass legal move generation, a tapered
//! evaluator, and the supporting lookup tables both depend on.
//!
//! The search and time-management layers live in a separate `chess_engine` crate built
//! on top of this one.

#![allow(dead_code)]

#[macro_use]
extern crate bitflags;

pub mod board;
pub mod core;
pub mod error;
pub mod helper;
pub mod tools;

pub use board::{Board, Castling, Position, State};
pub use core::bitboard::BitBoard;
pub use core::move_list::{MoveList, ScoringMoveList};
pub use core::piece_move::{Move, ScoringMove};
pub use core::sq::SQ;
pub use core::{File, Piece, PieceType, Player, Rank};
pub use error::EngineError;
pub use helper::Helper;
