//! Attack detection on the mailbox board.
//!
//! These functions never look at whose turn it is and never call back into
//! move generation.

use crate::Board;
use chess_core::{Color, Piece, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns the first occupied square along a ray, if any.
fn first_occupant(board: &Board, from: Square, (d_row, d_col): (i8, i8)) -> Option<Square> {
    let mut sq = from.offset(d_row, d_col)?;
    loop {
        if !board.is_empty(sq) {
            return Some(sq);
        }
        sq = sq.offset(d_row, d_col)?;
    }
}

fn slider_attacks(board: &Board, sq: Square, by: Color, rays: &[(i8, i8)], piece: Piece) -> bool {
    rays.iter().any(|&dir| {
        first_occupant(board, sq, dir)
            .and_then(|blocker| board.get(blocker))
            .is_some_and(|p| p.color == by && (p.piece == piece || p.piece == Piece::Queen))
    })
}

fn stepper_attacks(board: &Board, sq: Square, by: Color, offsets: &[(i8, i8)], piece: Piece) -> bool {
    offsets.iter().any(|&(d_row, d_col)| {
        sq.offset(d_row, d_col)
            .and_then(|from| board.get(from))
            .is_some_and(|p| p.is(piece, by))
    })
}

/// Returns true if `sq` is attacked by any piece of color `by`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // A pawn of `by` attacks from one row behind the target, seen from its side.
    let behind = -by.pawn_direction();
    let pawn = [(behind, 1), (behind, -1)];

    stepper_attacks(board, sq, by, &pawn, Piece::Pawn)
        || stepper_attacks(board, sq, by, &KNIGHT_OFFSETS, Piece::Knight)
        || stepper_attacks(board, sq, by, &KING_OFFSETS, Piece::King)
        || slider_attacks(board, sq, by, &ORTHOGONAL, Piece::Rook)
        || slider_attacks(board, sq, by, &DIAGONAL, Piece::Bishop)
}

/// Returns true if the king of `color` is attacked.
///
/// A board without that king is never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}
