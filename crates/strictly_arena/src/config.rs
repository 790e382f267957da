//! Arena configuration.

use crate::cli::ModelArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_tictactoe::DEFAULT_MAX_REJECTED_MOVES;
use tracing::{debug, info, instrument};

/// Who plays O.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Opponent {
    /// A second person at the same keyboard.
    Human,
    /// Exhaustive minimax search.
    Minimax,
    /// Nearest-neighbour model trained on recorded optimal play.
    Learned,
}

/// Configuration for a play or evaluation run.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Who plays O.
    #[serde(default = "default_opponent")]
    opponent: Opponent,

    /// Training data for the learned opponent.
    #[serde(default = "default_dataset")]
    dataset: PathBuf,

    /// Nearest samples that vote on a move.
    #[serde(default = "default_neighbors")]
    neighbors: usize,

    /// Fraction of samples held out for the accuracy report.
    #[serde(default = "default_test_fraction")]
    test_fraction: f64,

    /// Seed for the train/test shuffle.
    #[serde(default = "default_seed")]
    seed: u64,

    /// Consecutive rejected moves allowed in one turn.
    #[serde(default = "default_max_rejected_moves")]
    max_rejected_moves: u32,
}

fn default_opponent() -> Opponent {
    Opponent::Minimax
}

fn default_dataset() -> PathBuf {
    PathBuf::from("tictac_single.txt")
}

fn default_neighbors() -> usize {
    7
}

fn default_test_fraction() -> f64 {
    0.15
}

fn default_seed() -> u64 {
    42
}

fn default_max_rejected_moves() -> u32 {
    DEFAULT_MAX_REJECTED_MOVES
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            opponent: default_opponent(),
            dataset: default_dataset(),
            neighbors: default_neighbors(),
            test_fraction: default_test_fraction(),
            seed: default_seed(),
            max_rejected_moves: default_max_rejected_moves(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file, or defaults if it does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file; using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;

        info!(opponent = %config.opponent, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the opponent.
    pub fn set_opponent(&mut self, opponent: Opponent) {
        self.opponent = opponent;
    }

    /// Applies command-line overrides for the learned opponent.
    #[instrument(skip(self))]
    pub fn apply(&mut self, args: &ModelArgs) -> Result<(), ConfigError> {
        if let Some(dataset) = &args.dataset {
            self.dataset = dataset.clone();
        }
        if let Some(neighbors) = args.neighbors {
            self.neighbors = neighbors;
        }
        if let Some(test_fraction) = args.test_fraction {
            self.test_fraction = test_fraction;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.neighbors == 0 {
            return Err(ConfigError::new("neighbors must be at least 1".to_string()));
        }
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(ConfigError::new(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArenaConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(*config.opponent(), Opponent::Minimax);
        assert_eq!(*config.neighbors(), 7);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opponent = \"learned\"").unwrap();
        writeln!(file, "dataset = \"data/moves.txt\"").unwrap();
        writeln!(file, "neighbors = 3").unwrap();

        let config = ArenaConfig::load(file.path()).unwrap();
        assert_eq!(*config.opponent(), Opponent::Learned);
        assert_eq!(config.dataset(), &PathBuf::from("data/moves.txt"));
        assert_eq!(*config.neighbors(), 3);
        assert_eq!(*config.seed(), 42);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(ArenaConfig::from_toml("opponent = \"robot\"").is_err());
        assert!(ArenaConfig::from_toml("neighbors = 0").is_err());
        assert!(ArenaConfig::from_toml("test_fraction = 1.5").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ArenaConfig::default();
        let args = ModelArgs {
            neighbors: Some(11),
            seed: Some(9),
            ..ModelArgs::default()
        };
        config.apply(&args).unwrap();
        assert_eq!(*config.neighbors(), 11);
        assert_eq!(*config.seed(), 9);
        assert_eq!(*config.test_fraction(), 0.15);
    }
}
