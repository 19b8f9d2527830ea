//! Move generation.
//!
//! Moves are first generated per piece following movement patterns and
//! occupancy only, then filtered by playing each one on a scratch copy of the
//! position and rejecting those that leave the mover's king attacked.

mod attacks;
pub mod perft;

use crate::apply::apply_move;
use crate::position::{king_home, rook_home};
use crate::Position;
use chess_core::{CastleSide, Color, Move, Piece, Square};

use attacks::{DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL};
pub use attacks::{is_king_attacked, is_square_attacked};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so a fixed-size array keeps
/// generation off the heap.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if a move between the same squares is in the list.
    pub fn contains_squares(&self, m: &Move) -> bool {
        self.as_slice().iter().any(|candidate| candidate.same_squares(m))
    }

}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the legal moves of the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    legal_moves(position, position.side_to_move)
}

/// Generates the legal moves of `color`, regardless of whose turn it is.
pub fn legal_moves(position: &Position, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    let mut scratch = position.clone();

    for from in position.board.squares_of(color) {
        for m in &pseudo_moves(position, from) {
            apply_move(&mut scratch, *m);
            if !is_king_attacked(&scratch.board, color) {
                moves.push(*m);
            }
            scratch.clone_from(position);
        }
    }

    moves
}

/// Returns true if the king of `color` is attacked.
#[inline]
pub fn is_check(position: &Position, color: Color) -> bool {
    is_king_attacked(&position.board, color)
}

/// Generates the pseudo-legal moves of the piece standing on `from`.
///
/// Returns an empty list for an empty square. Promotions default to a queen.
pub fn pseudo_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(placed) = position.piece_at(from) else {
        return moves;
    };
    let color = placed.color;

    match placed.piece {
        Piece::Pawn => pawn_moves(position, from, color, &mut moves),
        Piece::Knight => step_moves(position, from, color, &KNIGHT_OFFSETS, &mut moves),
        Piece::Bishop => slide_moves(position, from, color, &DIAGONAL, &mut moves),
        Piece::Rook => slide_moves(position, from, color, &ORTHOGONAL, &mut moves),
        Piece::Queen => {
            slide_moves(position, from, color, &ORTHOGONAL, &mut moves);
            slide_moves(position, from, color, &DIAGONAL, &mut moves);
        }
        Piece::King => {
            step_moves(position, from, color, &KING_OFFSETS, &mut moves);
            castling_moves(position, from, color, &mut moves);
        }
    }

    moves
}

/// Pushes a pawn move, turning it into a queen promotion on the last rank.
fn push_pawn_move(m: Move, color: Color, moves: &mut MoveList) {
    if m.to.row() == color.promotion_rank() {
        moves.push(m.with_promotion(Piece::Queen));
    } else {
        moves.push(m);
    }
}

fn pawn_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    let board = &position.board;
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
        push_pawn_move(Move::normal(from, one), color, moves);

        if from.row() == color.pawn_rank() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
                moves.push(Move::double_step(from, two));
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(dir, d_col) else {
            continue;
        };
        if board.get(to).is_some_and(|p| p.color != color) {
            push_pawn_move(Move::capture(from, to), color, moves);
        }
    }

    // The captured pawn stands beside the mover, not on the target square.
    if let Some(target) = position.en_passant {
        let beside_target = from.row() as i8 + dir == target.row() as i8
            && (from.col() as i8 - target.col() as i8).abs() == 1;
        if beside_target {
            if let Some(victim) = Square::from_coords(from.row(), target.col()) {
                if board
                    .get(victim)
                    .is_some_and(|p| p.is(Piece::Pawn, color.opposite()))
                {
                    moves.push(Move::en_passant(from, target, victim));
                }
            }
        }
    }
}

fn step_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match position.piece_at(to) {
            None => moves.push(Move::normal(from, to)),
            Some(p) if p.color != color => moves.push(Move::capture(from, to)),
            Some(_) => {}
        }
    }
}

fn slide_moves(
    position: &Position,
    from: Square,
    color: Color,
    rays: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in rays {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(to) = cursor {
            match position.piece_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some(p) => {
                    if p.color != color {
                        moves.push(Move::capture(from, to));
                    }
                    break;
                }
            }
            cursor = to.offset(d_row, d_col);
        }
    }
}

fn castling_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    if from != king_home(color) {
        return;
    }
    let board = &position.board;
    let them = color.opposite();
    if is_square_attacked(board, from, them) {
        return;
    }
    let row = from.row();

    for side in CastleSide::BOTH {
        if !position.castling.can_castle(color, side) {
            continue;
        }

        let rook_sq = rook_home(color, side);
        let rook_ready = board
            .get(rook_sq)
            .is_some_and(|p| p.is(Piece::Rook, color) && !p.has_moved);
        if !rook_ready {
            continue;
        }

        let (low, high) = if rook_sq.col() < from.col() {
            (rook_sq.col() + 1, from.col())
        } else {
            (from.col() + 1, rook_sq.col())
        };
        let path_clear = (low..high)
            .filter_map(|col| Square::from_coords(row, col))
            .all(|sq| board.is_empty(sq));
        if !path_clear {
            continue;
        }

        let (Some(crossed), Some(to)) = (
            Square::from_coords(row, side.rook_target_col()),
            Square::from_coords(row, side.king_target_col()),
        ) else {
            continue;
        };
        if is_square_attacked(board, crossed, them) || is_square_attacked(board, to, them) {
            continue;
        }

        moves.push(Move::castle(from, to, side));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn has_move(moves: &MoveList, uci: &str) -> bool {
        moves.as_slice().iter().any(|m| m.to_uci() == uci)
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::normal(sq("e2"), sq("e4")));
        list.push(Move::normal(sq("d2"), sq("d4")));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].to_uci(), "e2e4");
        let collected: Vec<_> = list.into_iter().map(|m| m.to_uci()).collect();
        assert_eq!(collected, vec!["e2e4", "d2d4"]);
        assert_eq!(format!("{:?}", list), "[Move(e2e4), Move(d2d4)]");
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let position = Position::startpos();
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 20);
        assert!(has_move(&moves, "e2e4"));
        assert!(has_move(&moves, "g1f3"));
        assert_eq!(moves.as_slice().iter().filter(|m| m.double_step).count(), 8);
    }

    #[test]
    fn legal_moves_for_either_color() {
        let position = Position::startpos();
        assert_eq!(legal_moves(&position, Color::Black).len(), 20);
    }

    #[test]
    fn pseudo_moves_of_empty_square() {
        let position = Position::startpos();
        assert!(pseudo_moves(&position, sq("e4")).is_empty());
    }

    #[test]
    fn knight_and_slider_moves() {
        let position = Position::from_fen("4k3/8/8/3p4/8/8/1N6/R3K3 w - - 0 1").unwrap();
        let knight = pseudo_moves(&position, sq("b2"));
        assert_eq!(knight.len(), 4);
        let rook = pseudo_moves(&position, sq("a1"));
        // a2..a8 plus b1..d1
        assert_eq!(rook.len(), 10);
        let queen_board = Position::from_fen("4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        let queen = pseudo_moves(&queen_board, sq("d1"));
        assert!(has_move(&queen, "d1d5"));
        assert!(!has_move(&queen, "d1d6"));
        assert!(queen.as_slice().iter().any(|m| m.capture));
    }

    #[test]
    fn open_file_check_blocks_castling() {
        let position = Position::from_fen("4q2k/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(is_check(&position, Color::White));
        let moves = generate_moves(&position);
        assert!(moves.as_slice().iter().all(|m| m.castle.is_none()));
        // every reply leaves the e-file or blocks it
        assert!(!has_move(&moves, "e1e2"));
        assert!(has_move(&moves, "e1f2"));
    }

    #[test]
    fn castling_both_sides() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_moves(&position);
        let castles: Vec<_> = moves.as_slice().iter().filter_map(|m| m.castle).collect();
        assert_eq!(castles.len(), 2);
        assert!(has_move(&moves, "e1g1"));
        assert!(has_move(&moves, "e1c1"));
    }

    #[test]
    fn no_castling_through_attack() {
        // f1 is covered by the rook on f8
        let position = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert!(!has_move(&moves, "e1g1"));
        assert!(has_move(&moves, "e1c1"));
    }

    #[test]
    fn queenside_allows_attacked_b_file() {
        // b1 is attacked but the king never crosses it
        let position = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(has_move(&generate_moves(&position), "e1c1"));
    }

    #[test]
    fn no_castling_when_path_blocked_or_rook_moved() {
        let blocked = Position::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
        assert!(!has_move(&generate_moves(&blocked), "e1c1"));

        let mut moved = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        if let Some(rook) = moved.board.get(Square::A1) {
            moved.board.set(Square::A1, Some(rook.moved()));
        }
        assert!(!has_move(&generate_moves(&moved), "e1c1"));
    }

    #[test]
    fn en_passant_is_generated() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let moves = generate_moves(&position);
        let ep: Vec<_> = moves
            .as_slice()
            .iter()
            .filter(|m| m.en_passant_capture.is_some())
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_uci(), "e5f6");
        assert_eq!(ep[0].en_passant_capture, Some(sq("f5")));
        // d5 pawn is beside e5 but the target is on the f-file
        assert!(!has_move(&moves, "e5d6"));
    }

    #[test]
    fn pawn_promotes_to_queen_by_default() {
        let position = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let pawn = pseudo_moves(&position, sq("a7"));
        assert_eq!(pawn.len(), 2);
        assert!(pawn
            .as_slice()
            .iter()
            .all(|m| m.promotion == Some(Piece::Queen)));
        assert!(has_move(&pawn, "a7a8q"));
        assert!(has_move(&pawn, "a7b8q"));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let position = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert!(moves.as_slice().iter().all(|m| m.from != sq("e2")));
    }

    #[test]
    fn blocked_pawn_has_no_push() {
        let position = Position::from_fen("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1").unwrap();
        assert!(pseudo_moves(&position, sq("e2")).is_empty());
    }
}
