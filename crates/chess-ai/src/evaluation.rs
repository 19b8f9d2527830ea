//! Static evaluation.

use chess_core::{Color, Piece};
use chess_engine::Board;

/// Piece values in centipawns.
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20_000;

/// Material value of a piece kind.
#[inline]
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

/// Material balance: positive favours White, negative favours Black.
pub fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, p)| match p.color {
            Color::White => piece_value(p.piece),
            Color::Black => -piece_value(p.piece),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::Position;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&Board::standard()), 0);
    }

    #[test]
    fn material_difference() {
        let up_a_queen = Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(evaluate(&up_a_queen.board), QUEEN_VALUE);

        let down_a_knight = Position::from_fen("4k3/8/8/3n4/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&down_a_knight.board), -KNIGHT_VALUE);
    }

    #[test]
    fn kings_cancel_out() {
        let bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&bare.board), 0);
        assert_eq!(evaluate(&Board::empty()), 0);
    }
}
