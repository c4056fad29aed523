//! The engine reuses [`chess_core`]'s error type rather than defining a second one: every
//! fallible entry point here (bad FEN, illegal move, invalid option) is already one of its
//! variants.

pub use chess_core::EngineError;
