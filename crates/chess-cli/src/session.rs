//! Line protocol between a human player and the opponent.
//!
//! One command per line; every response is one or more plain lines.

use anyhow::Result;
use chess_ai::{AiError, Difficulty, Opponent};
use chess_core::{Color, Move, Square};
use chess_engine::{Game, GameStatus};
use std::io::{BufRead, Write};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Coordinate notation, e.g. `e2e4` or `e7e8n`.
    Play(String),
    /// All legal moves, or only those from one square.
    Moves(Option<Square>),
    Undo,
    Reset,
    Fen,
    Status,
    Difficulty(Difficulty),
    Quit,
}

impl Command {
    /// Parses a line; returns a message describing the problem on failure.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments to '{}'", word));
        }

        let cmd = match (word.to_ascii_lowercase().as_str(), arg) {
            ("moves", None) => Command::Moves(None),
            ("moves", Some(sq)) => match Square::from_algebraic(sq) {
                Some(sq) => Command::Moves(Some(sq)),
                None => return Err(format!("invalid square: {}", sq)),
            },
            ("undo", None) => Command::Undo,
            ("reset", None) => Command::Reset,
            ("fen", None) => Command::Fen,
            ("status", None) => Command::Status,
            ("quit" | "exit", None) => Command::Quit,
            ("difficulty", Some(name)) => {
                Command::Difficulty(name.parse().map_err(|e| format!("{}", e))?)
            }
            (_, None) => Command::Play(word.to_string()),
            (other, Some(_)) => return Err(format!("unexpected argument to '{}'", other)),
        };
        Ok(Some(cmd))
    }
}

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game between the human (playing `player`) and the opponent.
pub struct Session {
    game: Game,
    opponent: Opponent,
    player: Color,
}

impl Session {
    pub fn new(game: Game, opponent: Opponent, player: Color) -> Self {
        Session {
            game,
            opponent,
            player,
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Lets the opponent open when the human plays Black.
    pub fn start<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "playing {} against a {} opponent",
            self.player,
            self.opponent.difficulty()
        )?;
        self.engine_turn(out)
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.start(out)?;
        for line in input.lines() {
            if self.handle_line(&line?, out)? == Flow::Quit {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let cmd = match Command::parse(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Ok(Flow::Continue),
            Err(msg) => {
                writeln!(out, "error: {}", msg)?;
                return Ok(Flow::Continue);
            }
        };

        match cmd {
            Command::Play(uci) => self.play(&uci, out)?,
            Command::Moves(from) => {
                let moves: Vec<Move> = match from {
                    Some(sq) => self.game.moves_from(sq.row() as i32, sq.col() as i32)?,
                    None => self
                        .game
                        .legal_moves(self.game.side_to_move())
                        .as_slice()
                        .to_vec(),
                };
                let listed: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
                writeln!(out, "moves: {}", listed.join(" "))?;
            }
            Command::Undo => {
                // Take back the opponent's reply as well as the player's move.
                if self.game.undo().is_some() && self.game.side_to_move() != self.player {
                    self.game.undo();
                }
                writeln!(out, "fen: {}", self.game.to_fen())?;
                self.engine_turn(out)?;
            }
            Command::Reset => {
                self.game.reset();
                writeln!(out, "fen: {}", self.game.to_fen())?;
                self.engine_turn(out)?;
            }
            Command::Fen => writeln!(out, "fen: {}", self.game.to_fen())?,
            Command::Status => self.report_status(out)?,
            Command::Difficulty(difficulty) => {
                self.opponent.set_difficulty(difficulty);
                writeln!(out, "difficulty: {}", difficulty)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn play<W: Write>(&mut self, uci: &str, out: &mut W) -> Result<()> {
        if self.game.side_to_move() != self.player {
            writeln!(out, "error: not your turn")?;
            return Ok(());
        }
        if let Err(e) = self.game.commit_uci(uci) {
            writeln!(out, "error: {}", e)?;
            return Ok(());
        }
        tracing::info!(mv = uci, "player moved");
        self.engine_turn(out)
    }

    /// Plays the opponent's move if it is its turn and the game is not over.
    fn engine_turn<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.game.side_to_move() == self.player {
            return self.report_if_notable(out);
        }
        match self.opponent.choose_move(&self.game) {
            Ok(mv) => {
                self.game.commit(mv)?;
                tracing::info!(mv = %mv, "opponent moved");
                writeln!(out, "engine: {}", mv)?;
                self.report_if_notable(out)
            }
            Err(AiError::GameOver(_)) => self.report_status(out),
        }
    }

    fn report_if_notable<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.game.status() {
            GameStatus::InProgress => Ok(()),
            _ => self.report_status(out),
        }
    }

    fn report_status<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "status: {} ({} to move)",
            self.game.status(),
            self.game.side_to_move()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_ai::AiConfig;
    use chess_engine::Position;

    fn session(player: Color) -> Session {
        let config = AiConfig {
            difficulty: Difficulty::Random,
            ..AiConfig::default()
        };
        Session::new(Game::new(), Opponent::with_seed(config, 1), player)
    }

    fn feed(session: &mut Session, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            session.handle_line(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("  "), Ok(None));
        assert_eq!(Command::parse("e2e4"), Ok(Some(Command::Play("e2e4".into()))));
        assert_eq!(Command::parse("moves"), Ok(Some(Command::Moves(None))));
        assert_eq!(
            Command::parse("moves g1"),
            Ok(Some(Command::Moves(Square::from_algebraic("g1"))))
        );
        assert_eq!(Command::parse("UNDO"), Ok(Some(Command::Undo)));
        assert_eq!(
            Command::parse("difficulty deep"),
            Ok(Some(Command::Difficulty(Difficulty::Deep)))
        );
        assert!(Command::parse("moves z9").is_err());
        assert!(Command::parse("difficulty hard").is_err());
        assert!(Command::parse("fen now").is_err());
        assert_eq!(
            Command::parse("moves e2 junk"),
            Err("too many arguments to 'moves'".to_string())
        );
        assert!(Command::parse("difficulty deep now").is_err());
    }

    #[test]
    fn player_move_gets_a_reply() {
        let mut s = session(Color::White);
        let out = feed(&mut s, &["e2e4"]);
        assert!(out.starts_with("engine: "), "{}", out);
        assert_eq!(s.game().ply_count(), 2);
        assert_eq!(s.game().side_to_move(), Color::White);
    }

    #[test]
    fn illegal_move_is_reported() {
        let mut s = session(Color::White);
        let out = feed(&mut s, &["e2e5", "hello"]);
        assert!(out.contains("error: illegal move: e2e5"));
        assert!(out.contains("error: invalid move notation: hello"));
        assert_eq!(s.game().ply_count(), 0);
    }

    #[test]
    fn undo_takes_back_both_moves() {
        let mut s = session(Color::White);
        feed(&mut s, &["d2d4"]);
        let out = feed(&mut s, &["undo"]);
        assert_eq!(s.game().position(), &Position::startpos());
        assert!(out.contains("fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    }

    #[test]
    fn engine_opens_when_player_is_black() {
        let mut s = session(Color::Black);
        let mut out = Vec::new();
        s.start(&mut out).unwrap();
        assert_eq!(s.game().ply_count(), 1);
        assert_eq!(s.game().side_to_move(), Color::Black);

        // undo removes the opening move and the engine plays again
        feed(&mut s, &["undo"]);
        assert_eq!(s.game().ply_count(), 1);
        feed(&mut s, &["reset"]);
        assert_eq!(s.game().ply_count(), 1);
    }

    #[test]
    fn moves_and_status() {
        let mut s = session(Color::White);
        let out = feed(&mut s, &["moves g1", "status", "difficulty shallow"]);
        assert!(out.contains("moves: g1f3 g1h3") || out.contains("moves: g1h3 g1f3"));
        assert!(out.contains("status: in progress (White to move)"));
        assert!(out.contains("difficulty: shallow"));
    }

    #[test]
    fn run_stops_at_quit() {
        let mut s = session(Color::White);
        let input = "e2e4\nquit\ne7e5\n".as_bytes();
        let mut out = Vec::new();
        s.run(input, &mut out).unwrap();
        assert_eq!(s.game().ply_count(), 2);
    }
}
