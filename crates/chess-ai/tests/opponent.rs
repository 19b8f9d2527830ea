//! Opponent behaviour over whole games.

use chess_ai::{AiConfig, AiError, Difficulty, Opponent};
use chess_core::Color;
use chess_engine::{Game, GameStatus};
use std::io::Write;

fn config(difficulty: Difficulty) -> AiConfig {
    AiConfig {
        difficulty,
        ..AiConfig::default()
    }
}

#[test]
fn opponent_replies_are_always_legal() {
    let mut white = Opponent::with_seed(config(Difficulty::Random), 11);
    let mut black = Opponent::with_seed(config(Difficulty::Shallow), 12);
    let mut game = Game::new();

    for _ in 0..24 {
        let mover = match game.side_to_move() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match mover.choose_move(&game) {
            Ok(mv) => {
                assert!(game.legal_moves(game.side_to_move()).contains_squares(&mv));
                game.commit(mv).unwrap();
            }
            Err(AiError::GameOver(status)) => {
                assert!(status.is_over());
                break;
            }
        }
    }
    assert!(game.ply_count() > 0);
}

#[test]
fn choosing_does_not_touch_the_game() {
    let mut game = Game::new();
    game.commit_uci("e2e4").unwrap();
    let before = game.position().clone();
    let mut opponent = Opponent::with_seed(config(Difficulty::Deep), 5);
    let reply = opponent.choose_move(&game).unwrap();
    assert_eq!(game.position(), &before);
    assert_eq!(game.ply_count(), 1);
    game.commit(reply).unwrap();
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn checkmated_side_reports_game_over() {
    let mut game = Game::new();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.commit_uci(uci).unwrap();
    }
    let mut opponent = Opponent::with_seed(AiConfig::default(), 0);
    assert_eq!(
        opponent.choose_move(&game),
        Err(AiError::GameOver(GameStatus::Checkmate {
            winner: Color::Black
        }))
    );
}

#[test]
fn deep_opponent_mates_in_one() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let config = AiConfig::from_toml_str("difficulty = \"deep\"").unwrap();
    let mut opponent = Opponent::with_seed(config, 9);
    let mv = opponent.choose_move(&game).unwrap();
    game.commit(mv).unwrap();
    assert!(game.status().is_over());
}

#[test]
fn opponent_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "difficulty = \"random\"").unwrap();
    let config = AiConfig::load_from(file.path()).unwrap();
    let mut a = Opponent::with_seed(config.clone(), 3);
    let mut b = Opponent::with_seed(config, 3);
    let game = Game::new();
    assert_eq!(a.choose_move(&game), b.choose_move(&game));
}
