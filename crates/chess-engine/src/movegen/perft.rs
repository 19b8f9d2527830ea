//! Perft: leaf node counting for move generator validation.
//!
//! Generation only ever promotes to a queen, so reference counts are only
//! comparable for positions and depths without promotions.

use super::generate_moves;
use crate::apply::play_move;
use crate::Position;

/// Counts the leaf nodes reachable in exactly `depth` plies.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut scratch = position.clone();
    let mut nodes = 0u64;
    for m in &moves {
        play_move(&mut scratch, *m);
        nodes += perft(&scratch, depth - 1);
        scratch.clone_from(position);
    }
    nodes
}

/// Node counts per root move, sorted by coordinate notation.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = generate_moves(position)
        .as_slice()
        .iter()
        .map(|m| {
            let mut next = position.clone();
            play_move(&mut next, *m);
            (m.to_uci(), perft(&next, depth.saturating_sub(1)))
        })
        .collect();

    results.sort();
    results
}
