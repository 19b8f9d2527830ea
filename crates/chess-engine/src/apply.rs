//! Move application.
//!
//! [`apply_move`] is the only place the board is mutated while a game is
//! played. Moves are expected to come from the move generator; no legality
//! checks happen here.

use crate::position::rook_home;
use crate::Position;
use chess_core::{CastleSide, Color, Move, Piece, PlacedPiece, Square};

/// Applies `m` to the board, en passant target and castling rights.
///
/// The side to move and the clocks are left untouched; see [`play_move`].
/// Returns the captured piece, if any. An empty `from` square leaves the
/// position unchanged.
pub fn apply_move(position: &mut Position, m: Move) -> Option<PlacedPiece> {
    let moving = position.board.take(m.from)?;
    let color = moving.color;

    let captured = match m.en_passant_capture {
        Some(victim) => position.board.take(victim),
        None => position.board.get(m.to),
    };

    let landed = match m.promotion {
        Some(piece) => PlacedPiece::new(piece, color).moved(),
        None => moving.moved(),
    };
    position.board.set(m.to, Some(landed));

    if let Some(side) = m.castle {
        let row = m.from.row();
        let rook_squares = (
            Square::from_coords(row, side.rook_home_col()),
            Square::from_coords(row, side.rook_target_col()),
        );
        if let (Some(rook_from), Some(rook_to)) = rook_squares {
            if let Some(rook) = position.board.take(rook_from) {
                position.board.set(rook_to, Some(rook.moved()));
            }
        }
    }

    position.en_passant = if m.double_step {
        m.from.offset(color.pawn_direction(), 0)
    } else {
        None
    };

    match moving.piece {
        Piece::King => position.castling.remove_color(color),
        Piece::Rook => {
            for side in CastleSide::BOTH {
                if m.from == rook_home(color, side) {
                    position.castling.remove(color, side);
                }
            }
        }
        _ => {}
    }
    if let Some(taken) = captured.filter(|p| p.piece == Piece::Rook) {
        for side in CastleSide::BOTH {
            if m.to == rook_home(taken.color, side) {
                position.castling.remove(taken.color, side);
            }
        }
    }

    captured
}

/// Applies `m` and passes the turn: updates both clocks and flips the side
/// to move.
pub fn play_move(position: &mut Position, m: Move) -> Option<PlacedPiece> {
    let moving = position.piece_at(m.from)?;
    let captured = apply_move(position, m);

    if moving.piece == Piece::Pawn || captured.is_some() {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock = position.halfmove_clock.saturating_add(1);
    }
    if moving.color == Color::Black {
        position.fullmove_number = position.fullmove_number.saturating_add(1);
    }
    position.side_to_move = moving.color.opposite();

    captured
}

/// Returns the position after `m`, leaving `position` untouched.
pub fn make_move(position: &Position, m: Move) -> Position {
    let mut next = position.clone();
    play_move(&mut next, m);
    next
}
