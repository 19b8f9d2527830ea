//! Chess position representation.

use chess_core::{CastleSide, Color, Fen, FenError, Piece, PlacedPiece, Square};

use crate::Board;

/// Castling rights flags.
///
/// Rights are only ever removed while a game is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` may still castle on `side`.
    #[inline]
    pub const fn can_castle(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Removes one castling right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes both castling rights of a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::KingSide);
        self.remove(color, CastleSide::QueenSide);
    }

    /// Returns true if every right held by `self` is also held by `earlier`.
    #[inline]
    pub const fn is_subset_of(self, earlier: CastlingRights) -> bool {
        self.0 & !earlier.0 == 0
    }

    fn to_fen_field(self) -> String {
        let letters = [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ];
        letters
            .iter()
            .filter(|(color, side, _)| self.can_castle(*color, *side))
            .map(|(_, _, c)| *c)
            .collect()
    }
}

/// The home square of the rook used for castling on `side`.
#[inline]
pub fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::KingSide) => Square::H1,
        (Color::White, CastleSide::QueenSide) => Square::A1,
        (Color::Black, CastleSide::KingSide) => Square::H8,
        (Color::Black, CastleSide::QueenSide) => Square::A8,
    }
}

/// The square the king starts on.
#[inline]
pub fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// Complete mutable game state.
///
/// The value is self-contained and heap-free, so a clone is a full snapshot
/// that can be restored by plain assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// Square skipped by the previous ply's double pawn step, if any.
    pub en_passant: Option<Square>,

    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates a position with an empty board and White to move.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            castling: CastlingRights::ALL,
            ..Position::empty()
        }
    }

    /// Creates a position from a FEN string.
    ///
    /// FEN carries no move history, so `has_moved` is inferred: pawns off
    /// their starting rank, kings off their home square and rooks without a
    /// matching castling right count as moved.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;

        let mut castling = 0u8;
        for c in parsed.castling.chars() {
            match c {
                'K' => castling |= CastlingRights::WHITE_KINGSIDE,
                'Q' => castling |= CastlingRights::WHITE_QUEENSIDE,
                'k' => castling |= CastlingRights::BLACK_KINGSIDE,
                'q' => castling |= CastlingRights::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        let castling = CastlingRights::new(castling);

        let mut board = Board::empty();
        for sq in Square::all() {
            if let Some((piece, color)) = parsed.placement[sq.row() as usize][sq.col() as usize] {
                let has_moved = match piece {
                    Piece::Pawn => sq.row() != color.pawn_rank(),
                    Piece::King => sq != king_home(color),
                    Piece::Rook => !CastleSide::BOTH
                        .into_iter()
                        .any(|side| rook_home(color, side) == sq && castling.can_castle(color, side)),
                    _ => false,
                };
                board.set(
                    sq,
                    Some(PlacedPiece {
                        piece,
                        color,
                        has_moved,
                    }),
                );
            }
        }

        Ok(Position {
            board,
            side_to_move: parsed.side_to_move,
            castling,
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = [[None; 8]; 8];
        for (sq, p) in self.board.pieces() {
            placement[sq.row() as usize][sq.col() as usize] = Some((p.piece, p.color));
        }
        Fen {
            placement,
            side_to_move: self.side_to_move,
            castling: self.castling.to_fen_field(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PlacedPiece> {
        self.board.get(sq)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
