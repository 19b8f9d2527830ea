//! Move selection for the automated side.

use crate::search::Searcher;
use crate::{AiConfig, Difficulty};
use chess_core::{Color, Move};
use chess_engine::{game_status, generate_moves, Game, GameStatus, MoveList, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

/// Errors returned when the opponent cannot pick a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("game is over: {0}")]
    GameOver(GameStatus),
}

fn random_move<R: Rng + ?Sized>(moves: &MoveList, rng: &mut R) -> Option<Move> {
    moves.as_slice().choose(rng).copied()
}

/// Chooses a move for the side to move of `position`.
///
/// Search tiers fall back to a random legal move if the search returns none.
///
/// # Errors
///
/// Returns [`AiError::GameOver`] when the side to move has no legal moves.
pub fn choose_move<R: Rng + ?Sized>(
    position: &Position,
    config: &AiConfig,
    rng: &mut R,
) -> Result<Move, AiError> {
    let moves = generate_moves(position);
    let game_over = || AiError::GameOver(game_status(position));

    let Some(depth) = config.depth_for(config.difficulty) else {
        let mv = random_move(&moves, rng).ok_or_else(game_over)?;
        debug!(difficulty = %config.difficulty, mv = %mv, "picked random move");
        return Ok(mv);
    };

    if moves.is_empty() {
        return Err(game_over());
    }

    let mut working = position.clone();
    let maximizing = position.side_to_move == Color::White;
    let mut searcher = Searcher::new();
    let result = searcher.search(&mut working, depth, i32::MIN, i32::MAX, maximizing);
    debug!(
        difficulty = %config.difficulty,
        depth,
        score = result.score,
        nodes = searcher.nodes(),
        best = ?result.best_move,
        "search finished"
    );

    match result.best_move {
        Some(mv) => Ok(mv),
        None => random_move(&moves, rng).ok_or_else(game_over),
    }
}

/// An automated player: configuration plus its own random source.
#[derive(Debug, Clone)]
pub struct Opponent {
    config: AiConfig,
    rng: StdRng,
}

impl Opponent {
    /// Creates an opponent seeded from the operating system.
    pub fn new(config: AiConfig) -> Self {
        Opponent {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an opponent whose random choices are reproducible.
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Opponent {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    /// Picks a move for the side to move without touching `game`.
    pub fn choose_move(&mut self, game: &Game) -> Result<Move, AiError> {
        choose_move(game.position(), &self.config, &mut self.rng)
    }
}
