//! 8×8 mailbox board.

use chess_core::{Color, Piece, PlacedPiece, Square};

/// An 8×8 grid of optional pieces, indexed `[row][col]`.
///
/// The board performs no validation; it stores whatever callers put on it.
/// Cloning copies the whole grid, so a clone never aliases the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<PlacedPiece>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_rank() as usize;
            for (col, piece) in Piece::BACK_RANK.into_iter().enumerate() {
                board.squares[back][col] = Some(PlacedPiece::new(piece, color));
                board.squares[pawns][col] = Some(PlacedPiece::new(Piece::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<PlacedPiece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    /// Puts `piece` on `sq`, replacing whatever was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<PlacedPiece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<PlacedPiece> {
        self.squares[sq.row() as usize][sq.col() as usize].take()
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over occupied squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PlacedPiece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of `color`.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.color == color)
            .map(|(sq, _)| sq)
    }

    /// Finds the king of `color`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(Piece::King, color))
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.get(sq("e1")),
            Some(PlacedPiece::new(Piece::King, Color::White))
        );
        assert_eq!(
            board.get(sq("d8")),
            Some(PlacedPiece::new(Piece::Queen, Color::Black))
        );
        assert_eq!(
            board.get(sq("a1")),
            Some(PlacedPiece::new(Piece::Rook, Color::White))
        );
        assert_eq!(
            board.get(sq("g8")),
            Some(PlacedPiece::new(Piece::Knight, Color::Black))
        );
        assert!(board.is_empty(sq("e4")));
        for color in Color::BOTH {
            let count = |piece| board.pieces().filter(|(_, p)| p.is(piece, color)).count();
            assert_eq!(count(Piece::Pawn), 8);
            assert_eq!(count(Piece::King), 1);
            assert_eq!(count(Piece::Bishop), 2);
        }
        assert!(board.pieces().all(|(_, p)| !p.has_moved));
    }

    #[test]
    fn king_square() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn set_and_take() {
        let mut board = Board::empty();
        let knight = PlacedPiece::new(Piece::Knight, Color::Black);
        board.set(sq("c6"), Some(knight));
        assert_eq!(board.get(sq("c6")), Some(knight));
        assert_eq!(board.take(sq("c6")), Some(knight));
        assert!(board.is_empty(sq("c6")));
        assert_eq!(board.take(sq("c6")), None);
    }

    #[test]
    fn clone_does_not_alias() {
        let original = Board::standard();
        let mut copy = original.clone();
        copy.take(sq("e2"));
        assert!(copy.is_empty(sq("e2")));
        assert!(!original.is_empty(sq("e2")));
    }

    #[test]
    fn squares_of_color() {
        let board = Board::standard();
        let white: Vec<Square> = board.squares_of(Color::White).collect();
        assert_eq!(white.len(), 16);
        assert!(white.iter().all(|s| s.row() <= 1));
    }
}
