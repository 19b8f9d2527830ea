//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Castling with the h-file rook (O-O).
    KingSide,
    /// Castling with the a-file rook (O-O-O).
    QueenSide,
}

impl CastleSide {
    /// Both sides, king side first.
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// Column the rook starts on.
    #[inline]
    pub const fn rook_home_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// Column the rook lands on, the square the king crosses.
    #[inline]
    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
}

/// A chess move.
///
/// A move only describes intent; the flags are filled in by the move
/// generator so that applying it never has to re-derive them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece a pawn turns into on the last rank.
    pub promotion: Option<Piece>,
    pub castle: Option<CastleSide>,
    /// Pawn advanced two squares; the skipped square becomes the en passant target.
    pub double_step: bool,
    /// Square of the pawn taken en passant (differs from `to`).
    pub en_passant_capture: Option<Square>,
    pub capture: bool,
}

impl Move {
    /// Creates a quiet move with no special flags.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            castle: None,
            double_step: false,
            en_passant_capture: None,
            capture: false,
        }
    }

    /// Creates a capture of the piece standing on `to`.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move {
            capture: true,
            ..Move::normal(from, to)
        }
    }

    /// Creates a two-square pawn advance.
    #[inline]
    pub const fn double_step(from: Square, to: Square) -> Self {
        Move {
            double_step: true,
            ..Move::normal(from, to)
        }
    }

    /// Creates an en passant capture of the pawn on `captured`.
    #[inline]
    pub const fn en_passant(from: Square, to: Square, captured: Square) -> Self {
        Move {
            en_passant_capture: Some(captured),
            capture: true,
            ..Move::normal(from, to)
        }
    }

    /// Creates a castling move of the king from `from` to `to`.
    #[inline]
    pub const fn castle(from: Square, to: Square, side: CastleSide) -> Self {
        Move {
            castle: Some(side),
            ..Move::normal(from, to)
        }
    }

    /// Returns the same move promoting to `piece`.
    #[inline]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        Move {
            promotion: Some(piece),
            ..self
        }
    }

    /// Returns true if `other` moves between the same squares.
    #[inline]
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from coordinate notation.
    ///
    /// Only `from`, `to` and the promotion piece are known from the text; the
    /// remaining flags come from matching it against the legal move list.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let mv = Move::normal(from, to);
        match s.chars().nth(4) {
            Some(c) => {
                let piece = Piece::from_char(c)?;
                if !piece.is_promotion_choice() {
                    return None;
                }
                Some(mv.with_promotion(piece))
            }
            None => Some(mv),
        }
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
