//! Opponent configuration loaded from TOML.
//!
//! ```toml
//! difficulty = "deep"
//! shallow_depth = 2
//! deep_depth = 3
//! ```

use crate::Difficulty;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML or has fields of the wrong type.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A search depth of zero would never produce a move.
    #[error("{0} must be at least 1")]
    InvalidDepth(&'static str),
}

/// Settings of the automated opponent.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Search depth in plies for [`Difficulty::Shallow`]. Defaults to 2.
    #[serde(default = "default_shallow_depth")]
    pub shallow_depth: u32,
    /// Search depth in plies for [`Difficulty::Deep`]. Defaults to 3.
    #[serde(default = "default_deep_depth")]
    pub deep_depth: u32,
}

fn default_shallow_depth() -> u32 {
    2
}

fn default_deep_depth() -> u32 {
    3
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            difficulty: Difficulty::default(),
            shallow_depth: default_shallow_depth(),
            deep_depth: default_deep_depth(),
        }
    }
}

impl AiConfig {
    /// Loads `chess.toml` from the working directory, or the defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads the configuration at `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] for invalid TOML and
    /// [`ConfigError::InvalidDepth`] for a zero depth.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file location.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shallow_depth == 0 {
            return Err(ConfigError::InvalidDepth("shallow_depth"));
        }
        if self.deep_depth == 0 {
            return Err(ConfigError::InvalidDepth("deep_depth"));
        }
        Ok(())
    }

    /// Search depth for `difficulty`; `None` for random play.
    pub fn depth_for(&self, difficulty: Difficulty) -> Option<u32> {
        match difficulty {
            Difficulty::Random => None,
            Difficulty::Shallow => Some(self.shallow_depth),
            Difficulty::Deep => Some(self.deep_depth),
        }
    }
}
