//! FEN (Forsyth-Edwards Notation) tokenizing.
//!
//! Only what is needed to set up and dump positions: placement, side to
//! move, castling letters, en passant square and the two clocks. The clocks
//! may be omitted, in which case they default to `0 1`.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
}

/// Piece placement indexed as `[row][col]`, row 0 being rank 1.
pub type Placement = [[Option<(Piece, Color)>; 8]; 8];

/// Parsed FEN fields.
///
/// The engine turns this into its own position type; this struct does no
/// chess-level validation (king count, pawn ranks, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub placement: Placement,
    pub side_to_move: Color,
    /// Castling letters in `KQkq` order, empty for `-`.
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            ep => match Square::from_algebraic(ep) {
                Some(sq) if sq.row() == 2 || sq.row() == 5 => Some(sq),
                _ => return Err(FenError::InvalidEnPassantSquare(ep.to_string())),
            },
        };

        let (halfmove_clock, fullmove_number) = if fields.len() == 6 {
            (parse_counter(fields[4])?, parse_counter(fields[5])?)
        } else {
            (0, 1)
        };

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Formats the fields back into a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in (0..8).rev() {
            let mut empty = 0;
            for col in 0..8 {
                match self.placement[row][col] {
                    Some((piece, color)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let castling = if self.castling.is_empty() {
            "-"
        } else {
            self.castling.as_str()
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());

        format!(
            "{} {} {} {} {} {}",
            fen, side, castling, en_passant, self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_placement(field: &str) -> Result<Placement, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut placement: Placement = [[None; 8]; 8];
    for (i, rank) in ranks.iter().enumerate() {
        // FEN lists rank 8 first
        let row = 7 - i;
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                col += skip as usize;
            } else if let Some(entry) = Piece::from_fen_char(c) {
                if col < 8 {
                    placement[row][col] = Some(entry);
                }
                col += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    row + 1
                )));
            }
        }
        if col != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                row + 1,
                col
            )));
        }
    }

    Ok(placement)
}

fn parse_castling(field: &str) -> Result<String, FenError> {
    if field == "-" {
        return Ok(String::new());
    }
    if field.chars().any(|c| !"KQkq".contains(c)) {
        return Err(FenError::InvalidCastlingRights(field.to_string()));
    }
    // Normalize to KQkq order without duplicates
    Ok("KQkq".chars().filter(|c| field.contains(*c)).collect())
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field
        .parse::<u32>()
        .map_err(|_| FenError::InvalidCounter(field.to_string()))
}
