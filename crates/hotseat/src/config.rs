//! Configuration file loading for the terminal driver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Driver configuration, loaded from `chess.toml` in the working
/// directory. Every setting has a default, so the file is optional.
#[derive(Debug, Deserialize, Serialize)]
pub struct CliConfig {
    /// Directory where game snapshots are stored.
    /// Defaults to "saves".
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            save_dir: default_save_dir(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from disk, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
