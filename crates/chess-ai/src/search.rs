//! Depth-limited minimax with alpha-beta pruning.
//!
//! The searcher works on a caller-owned copy of the position: each child is
//! played in place and the node's snapshot is restored afterwards, so the
//! position is unchanged once a call returns.

use crate::evaluation::evaluate;
use chess_core::{Color, Move};
use chess_engine::{generate_moves, is_check, play_move, Position};

/// Score of a checkmate, from White's point of view when positive.
pub const MATE_SCORE: i32 = 999_999;

/// Outcome of a search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` at leaves and in positions without legal moves.
    pub best_move: Option<Move>,
}

impl SearchResult {
    const fn leaf(score: i32) -> Self {
        SearchResult {
            score,
            best_move: None,
        }
    }
}

/// Search state.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Minimax search of `depth` plies with an `[alpha, beta]` window.
    ///
    /// `maximizing` is true when the side to move should maximize the
    /// White-positive score.
    pub fn search(
        &mut self,
        position: &mut Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes += 1;

        if depth == 0 {
            return SearchResult::leaf(evaluate(&position.board));
        }

        let moves = generate_moves(position);
        if moves.is_empty() {
            return if !is_check(position, position.side_to_move) {
                SearchResult::leaf(0)
            } else if maximizing {
                SearchResult::leaf(-MATE_SCORE)
            } else {
                SearchResult::leaf(MATE_SCORE)
            };
        }

        let snapshot = position.clone();
        let mut best = SearchResult::leaf(if maximizing { i32::MIN } else { i32::MAX });

        for m in &moves {
            play_move(position, *m);
            let child = self.search(position, depth - 1, alpha, beta, !maximizing);
            position.clone_from(&snapshot);

            if maximizing {
                if child.score > best.score {
                    best = SearchResult {
                        score: child.score,
                        best_move: Some(*m),
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if child.score < best.score {
                    best = SearchResult {
                        score: child.score,
                        best_move: Some(*m),
                    };
                }
                beta = beta.min(best.score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Searches `position` for the side to move with a full window.
pub fn search(position: &Position, depth: u32) -> SearchResult {
    let mut working = position.clone();
    let maximizing = position.side_to_move == Color::White;
    Searcher::new().search(&mut working, depth, i32::MIN, i32::MAX, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Plain minimax without pruning, for comparing scores.
    fn minimax(position: &Position, depth: u32, maximizing: bool) -> i32 {
        if depth == 0 {
            return evaluate(&position.board);
        }
        let moves = generate_moves(position);
        if moves.is_empty() {
            return match (is_check(position, position.side_to_move), maximizing) {
                (false, _) => 0,
                (true, true) => -MATE_SCORE,
                (true, false) => MATE_SCORE,
            };
        }
        let scores = moves.as_slice().iter().map(|m| {
            let mut next = position.clone();
            play_move(&mut next, *m);
            minimax(&next, depth - 1, !maximizing)
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    #[test]
    fn takes_the_only_winning_capture() {
        let mut position = Position::from_fen("3q3k/8/8/8/8/8/8/K2R4 w - - 0 1").unwrap();
        let result = Searcher::new().search(&mut position, 1, i32::MIN, i32::MAX, true);
        assert_eq!(result.best_move.map(|m| m.to_uci()), Some("d1d8".to_string()));
        assert!(result.score > 0);
    }

    #[test]
    fn leaf_has_no_move() {
        let result = search(&Position::startpos(), 0);
        assert_eq!(result, SearchResult::leaf(0));
    }

    #[test]
    fn finds_mate_in_one_for_white() {
        let position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = search(&position, 2);
        assert_eq!(result.best_move.map(|m| m.to_uci()), Some("a1a8".to_string()));
        assert_eq!(result.score, MATE_SCORE);
    }

    #[test]
    fn finds_mate_in_one_for_black() {
        let position = Position::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        let result = search(&position, 2);
        assert_eq!(result.best_move.map(|m| m.to_uci()), Some("a8a1".to_string()));
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn terminal_positions_score_directly() {
        let mated = Position::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(search(&mated, 3), SearchResult::leaf(MATE_SCORE));

        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(search(&stalemate, 2), SearchResult::leaf(0));
    }

    #[test]
    fn search_restores_working_position() {
        let original = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let mut working = original.clone();
        let mut searcher = Searcher::new();
        let result = searcher.search(&mut working, 2, i32::MIN, i32::MAX, true);
        assert_eq!(working, original);
        assert!(result.best_move.is_some());
        assert!(searcher.nodes() > 1);
    }

    #[test]
    fn pruning_keeps_minimax_score() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/3p4/4P3/8/8/4K3 b - - 0 1",
        ] {
            let position = Position::from_fen(fen).unwrap();
            let maximizing = position.side_to_move == Color::White;
            for depth in 1..=3 {
                assert_eq!(
                    search(&position, depth).score,
                    minimax(&position, depth, maximizing),
                    "{} at depth {}",
                    fen,
                    depth
                );
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn best_move_is_legal_and_position_restored(selectors in prop::collection::vec(any::<usize>(), 0..20)) {
            let mut position = Position::startpos();
            for pick in selectors {
                let moves = generate_moves(&position);
                if moves.is_empty() {
                    break;
                }
                play_move(&mut position, moves[pick % moves.len()]);
            }

            let before = position.clone();
            let maximizing = position.side_to_move == Color::White;
            let result = Searcher::new().search(&mut position, 2, i32::MIN, i32::MAX, maximizing);
            prop_assert_eq!(&position, &before);

            let legal = generate_moves(&position);
            match result.best_move {
                Some(m) => prop_assert!(legal.as_slice().contains(&m)),
                None => prop_assert!(legal.is_empty()),
            }
        }
    }
}
