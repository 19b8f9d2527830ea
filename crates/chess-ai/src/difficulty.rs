//! Difficulty tiers.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the opponent picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move.
    Random,
    /// Alpha-beta search at the configured shallow depth.
    #[default]
    Shallow,
    /// Alpha-beta search at the configured deep depth.
    Deep,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Random, Difficulty::Shallow, Difficulty::Deep];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Random => "random",
            Difficulty::Shallow => "shallow",
            Difficulty::Deep => "deep",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}', expected random, shallow or deep")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
        assert_eq!("DEEP".parse::<Difficulty>(), Ok(Difficulty::Deep));
        assert!("hard".parse::<Difficulty>().is_err());
    }

    #[test]
    fn default_is_shallow() {
        assert_eq!(Difficulty::default(), Difficulty::Shallow);
    }
}
