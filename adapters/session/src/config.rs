use std::{
    fs,
    path::{Path, PathBuf},
};

use maze_runner_core::Tuning;
use maze_runner_world::ExitPolicy;
use serde::Deserialize;
use thiserror::Error;

/// Settings a session is created with, usually read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Agent speeds, radii and grid scale.
    pub tuning: Tuning,
    /// How the exit cell is chosen.
    pub exit_policy: ExitPolicy,
    /// Seed for the fallback maze generator.
    pub generator_seed: u64,
}

/// Failure to read or parse a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for a session.
    #[error("invalid session config")]
    Parse(#[from] toml::de::Error),
}

impl SessionConfig {
    /// Parses a configuration from TOML text; omitted fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
