//! Chess rules engine on an 8×8 mailbox board.
//!
//! This crate provides:
//! - [`Board`] - grid of optional pieces
//! - [`Position`] - board plus side to move, castling rights and en passant target
//! - Attack detection and legal move generation ([`movegen`])
//! - [`apply_move`] - the single point where moves mutate a position
//! - [`Game`] - committed play with undo history and status queries
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameStatus};
//! use chess_core::Color;
//!
//! let mut game = Game::new();
//! assert_eq!(game.legal_moves(Color::White).len(), 20);
//!
//! for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.commit_uci(uci).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
//! ```

mod apply;
mod board;
mod game;
pub mod movegen;
mod position;
pub mod rules;

pub use apply::{apply_move, make_move, play_move};
pub use board::Board;
pub use game::{Game, GameError, HistoryEntry};
pub use movegen::{
    generate_moves, is_check, is_king_attacked, is_square_attacked, legal_moves, pseudo_moves,
    MoveList,
};
pub use position::{king_home, rook_home, CastlingRights, Position};
pub use rules::{game_status, is_terminal, GameStatus};
