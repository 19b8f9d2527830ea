//! End-of-game detection.
//!
//! Only checkmate and stalemate end a game; move-count and repetition draws
//! are not tracked.

use crate::movegen::{is_check, legal_moves};
use crate::Position;
use chess_core::Color;
use std::fmt;

/// Status of a position from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has legal moves and is not in check.
    InProgress,
    /// The side to move is in check but can escape.
    Check,
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal moves and is not in check.
    Stalemate,
}

impl GameStatus {
    /// Returns true if the game has ended.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Returns true if `color` has no legal moves (checkmate or stalemate).
pub fn is_terminal(position: &Position, color: Color) -> bool {
    legal_moves(position, color).is_empty()
}

/// Classifies the position for the side to move.
pub fn game_status(position: &Position) -> GameStatus {
    let us = position.side_to_move;
    let in_check = is_check(position, us);
    match (is_terminal(position, us), in_check) {
        (true, true) => GameStatus::Checkmate {
            winner: us.opposite(),
        },
        (true, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::Check,
        (false, false) => GameStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_in_progress() {
        let position = Position::startpos();
        assert_eq!(game_status(&position), GameStatus::InProgress);
        assert!(!is_terminal(&position, Color::White));
        assert!(!game_status(&position).is_over());
    }

    #[test]
    fn back_rank_mate() {
        let position = Position::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let status = game_status(&position);
        assert_eq!(
            status,
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert!(status.is_over());
        assert_eq!(status.to_string(), "checkmate, White wins");
    }

    #[test]
    fn stalemate() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game_status(&position), GameStatus::Stalemate);
        assert!(is_terminal(&position, Color::Black));
        assert!(!is_check(&position, Color::Black));
    }

    #[test]
    fn check_with_escape() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        assert_eq!(game_status(&position), GameStatus::Check);
    }
}
