//! Chess CLI - play against the automated opponent over stdin/stdout.
//!
//! Moves are entered in coordinate notation (`e2e4`, `e7e8n`). Logs go to
//! stderr so stdout only carries protocol lines.

mod session;

use anyhow::Context;
use chess_ai::{AiConfig, Difficulty, Opponent};
use chess_core::Color;
use chess_engine::Game;
use clap::Parser;
use session::Session;
use std::io;
use std::path::PathBuf;

/// Play chess against the automated opponent.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Play chess against the automated opponent over stdin/stdout")]
struct Args {
    /// Path to the opponent configuration file [default: chess.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured difficulty (random, shallow, deep)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Color played by the human
    #[arg(long, default_value = "white")]
    play_as: Color,

    /// Seed for the opponent's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a FEN position instead of the standard one
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AiConfig::load_from(path),
        None => AiConfig::load(),
    }
    .with_context(|| {
        let path = args.config.clone().unwrap_or_else(AiConfig::config_path);
        format!("loading {}", path.display())
    })?;
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    tracing::info!("Config: {:?}", config);

    let game = match &args.fen {
        Some(fen) => Game::from_fen(fen).context("invalid --fen")?,
        None => Game::new(),
    };
    let opponent = match args.seed {
        Some(seed) => Opponent::with_seed(config, seed),
        None => Opponent::new(config),
    };

    tracing::info!("Human plays {}", args.play_as);
    let mut session = Session::new(game, opponent, args.play_as);
    session.run(io::stdin().lock(), &mut io::stdout().lock())?;
    tracing::info!("Session ended");
    Ok(())
}
