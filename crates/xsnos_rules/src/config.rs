//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How the engine treats a play by the player whose turn it isn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TurnPolicy {
    /// Reject out-of-turn plays.
    #[default]
    #[display("strict")]
    Strict,
    /// Accept whichever player the caller names; turn stays derived from
    /// piece counts.
    #[display("lenient")]
    Lenient,
}

/// Configuration for a [`BoardRulesEngine`](crate::BoardRulesEngine).
///
/// Every deserialization path validates the tray size.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawEngineConfig")]
pub struct EngineConfig {
    /// Turn-order enforcement.
    turn_policy: TurnPolicy,

    /// Pieces in each player's tray at the start of a game.
    pieces_per_player: usize,
}

/// Unvalidated wire form of an [`EngineConfig`].
#[derive(Debug, Deserialize)]
struct RawEngineConfig {
    #[serde(default)]
    turn_policy: TurnPolicy,
    #[serde(default = "default_pieces_per_player")]
    pieces_per_player: usize,
}

impl TryFrom<RawEngineConfig> for EngineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEngineConfig) -> Result<Self, Self::Error> {
        Self::new(raw.turn_policy, raw.pieces_per_player)
    }
}

fn default_pieces_per_player() -> usize {
    6
}

/// Fewest pieces that still let X fill a board in alternating play.
const MIN_PIECES: usize = 5;
/// More pieces than cells are never usable.
const MAX_PIECES: usize = 9;

impl EngineConfig {
    /// Creates a configuration, validating the tray size.
    #[instrument]
    pub fn new(turn_policy: TurnPolicy, pieces_per_player: usize) -> Result<Self, ConfigError> {
        let config = Self {
            turn_policy,
            pieces_per_player,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different turn policy.
    pub fn with_turn_policy(mut self, turn_policy: TurnPolicy) -> Self {
        self.turn_policy = turn_policy;
        self
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading engine config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(turn_policy = %config.turn_policy, pieces = config.pieces_per_player, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PIECES..=MAX_PIECES).contains(&self.pieces_per_player) {
            return Err(ConfigError::new(format!(
                "pieces_per_player must be between {} and {}, got {}",
                MIN_PIECES, MAX_PIECES, self.pieces_per_player
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_policy: TurnPolicy::default(),
            pieces_per_player: default_pieces_per_player(),
        }
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
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(*config.turn_policy(), TurnPolicy::Strict);
        assert_eq!(*config.pieces_per_player(), 6);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_lenient_from_toml() {
        let config = EngineConfig::from_toml_str(
            "turn_policy = \"lenient\"\npieces_per_player = 9\n",
        )
        .unwrap();
        assert_eq!(*config.turn_policy(), TurnPolicy::Lenient);
        assert_eq!(*config.pieces_per_player(), 9);
    }

    #[test]
    fn test_tray_too_small_rejected() {
        let err = EngineConfig::from_toml_str("pieces_per_player = 4").unwrap_err();
        assert!(err.message.contains("pieces_per_player"));
        assert!(EngineConfig::new(TurnPolicy::Strict, 10).is_err());
    }

    #[test]
    fn test_serde_paths_validate_tray() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{"pieces_per_player":0}"#).is_err());
        assert!(toml::from_str::<EngineConfig>("pieces_per_player = 2").is_err());

        let config: EngineConfig =
            serde_json::from_str(r#"{"turn_policy":"lenient","pieces_per_player":5}"#).unwrap();
        assert_eq!(config, EngineConfig::new(TurnPolicy::Lenient, 5).unwrap());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<EngineConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(EngineConfig::from_toml_str("turn_policy = \"sloppy\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "turn_policy = \"lenient\"").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.turn_policy(), TurnPolicy::Lenient);
    }

    #[test]
    fn test_missing_file_reports_location() {
        let err = EngineConfig::from_file("/nonexistent/xsnos.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
        assert!(err.file.ends_with("config.rs"));
    }
}
