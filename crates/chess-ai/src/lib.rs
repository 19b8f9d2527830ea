//! Automated chess opponent.
//!
//! - [`evaluate`] - material balance, White positive
//! - [`Searcher`] - minimax with alpha-beta pruning over a working copy
//! - [`Difficulty`] and [`AiConfig`] - tier selection and depths, loadable from TOML
//! - [`choose_move`] / [`Opponent`] - pick a move for the side to move
//!
//! # Example
//!
//! ```
//! use chess_ai::{AiConfig, Difficulty, Opponent};
//! use chess_engine::Game;
//!
//! let config = AiConfig { difficulty: Difficulty::Random, ..AiConfig::default() };
//! let mut opponent = Opponent::with_seed(config, 7);
//! let mut game = Game::new();
//! let reply = opponent.choose_move(&game).unwrap();
//! game.commit(reply).unwrap();
//! ```

mod config;
mod difficulty;
mod evaluation;
mod opponent;
pub mod search;

pub use config::{AiConfig, ConfigError};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use evaluation::{evaluate, piece_value};
pub use opponent::{choose_move, AiError, Opponent};
pub use search::{SearchResult, Searcher, MATE_SCORE};
