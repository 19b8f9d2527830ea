//! Game management with an undo history.
//!
//! [`Game`] owns the live [`Position`] and a stack of snapshots taken before
//! every committed move. Moves are only ever applied after being matched
//! against the current legal move list.

use crate::apply::play_move;
use crate::movegen::{generate_moves, is_check, legal_moves};
use crate::rules::{game_status, is_terminal, GameStatus};
use crate::{MoveList, Position};
use chess_core::{Color, FenError, Move, Piece, PlacedPiece, Square};
use thiserror::Error;
use tracing::debug;

/// A committed move together with the state it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The move as applied, promotion piece included.
    pub mov: Move,
    /// The piece taken by the move, if any.
    pub captured: Option<PlacedPiece>,
    /// Full position before the move.
    pub before: Position,
}

/// Errors returned by [`Game`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("cannot promote to {0}")]
    InvalidPromotion(Piece),

    #[error("square ({row}, {col}) is off the board")]
    InvalidSquare { row: i32, col: i32 },
}

/// A chess game: the live position plus undo history.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<HistoryEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from an arbitrary position with empty history.
    pub fn from_position(position: Position) -> Self {
        Game {
            position,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmove_number
    }

    /// Number of plies committed since the game (or last reset) started.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the piece at `(row, col)`, rejecting coordinates off the board.
    pub fn piece_at(&self, row: i32, col: i32) -> Result<Option<PlacedPiece>, GameError> {
        Ok(self.position.piece_at(square_at(row, col)?))
    }

    /// Legal moves of `color`.
    pub fn legal_moves(&self, color: Color) -> MoveList {
        legal_moves(&self.position, color)
    }

    /// Legal moves of the piece on `(row, col)` when it belongs to the side
    /// to move; empty otherwise.
    pub fn moves_from(&self, row: i32, col: i32) -> Result<Vec<Move>, GameError> {
        let from = square_at(row, col)?;
        Ok(generate_moves(&self.position)
            .as_slice()
            .iter()
            .filter(|m| m.from == from)
            .copied()
            .collect())
    }

    pub fn is_check(&self, color: Color) -> bool {
        is_check(&self.position, color)
    }

    /// Returns true if `color` has no legal moves.
    pub fn is_terminal(&self, color: Color) -> bool {
        is_terminal(&self.position, color)
    }

    /// Status for the side to move.
    pub fn status(&self) -> GameStatus {
        game_status(&self.position)
    }

    /// Commits a move for the side to move.
    ///
    /// Only `from`, `to` and `promotion` of `m` are looked at; the flags are
    /// taken from the matching legal move. A promotion move without a piece
    /// promotes to a queen. Returns the captured piece, if any.
    pub fn commit(&mut self, m: Move) -> Result<Option<PlacedPiece>, GameError> {
        let legal = generate_moves(&self.position);
        let Some(matched) = legal.as_slice().iter().find(|l| l.same_squares(&m)) else {
            return Err(GameError::IllegalMove(m.to_uci()));
        };

        let chosen = match (matched.promotion, m.promotion) {
            (_, Some(piece)) if !piece.is_promotion_choice() => {
                return Err(GameError::InvalidPromotion(piece));
            }
            (Some(_), Some(piece)) => matched.with_promotion(piece),
            (Some(_), None) => *matched,
            (None, Some(_)) => return Err(GameError::IllegalMove(m.to_uci())),
            (None, None) => *matched,
        };

        let before = self.position.clone();
        let captured = play_move(&mut self.position, chosen);
        debug!(
            mv = %chosen,
            captured = ?captured.map(|p| p.piece),
            fen = %self.position.to_fen(),
            "committed move"
        );
        self.history.push(HistoryEntry {
            mov: chosen,
            captured,
            before,
        });
        Ok(captured)
    }

    /// Parses coordinate notation and commits the move.
    pub fn commit_uci(&mut self, uci: &str) -> Result<Option<PlacedPiece>, GameError> {
        let m = Move::from_uci(uci.trim()).ok_or_else(|| GameError::InvalidNotation(uci.to_string()))?;
        self.commit(m)
    }

    /// Reverts the last committed move; returns it, or `None` on empty
    /// history.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.position = entry.before;
        debug!(mv = %entry.mov, "undid move");
        Some(entry.mov)
    }

    /// Returns to the standard starting position and clears history.
    pub fn reset(&mut self) {
        self.position = Position::startpos();
        self.history.clear();
        debug!("game reset");
    }

    /// Current position as FEN.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

fn square_at(row: i32, col: i32) -> Result<Square, GameError> {
    u8::try_from(row)
        .ok()
        .zip(u8::try_from(col).ok())
        .and_then(|(r, c)| Square::from_coords(r, c))
        .ok_or(GameError::InvalidSquare { row, col })
}
