//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the engine and
//! the automated opponent:
//! - [`Piece`], [`PlacedPiece`] and [`Color`] for piece representation
//! - [`Square`] for (row, column) board coordinates
//! - [`Move`] and [`CastleSide`] for move descriptors
//! - FEN tokenizing for setting up positions

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::{Color, ParseColorError};
pub use fen::{Fen, FenError, Placement};
pub use mov::{CastleSide, Move};
pub use piece::{Piece, PlacedPiece};
pub use square::Square;
