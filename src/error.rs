//! Error types.
//!
//! Nothing inside a frame fails in a modelled way; these cover startup
//! (configuration, seed measurement) and terminal I/O.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config value '{name}' = {value} is invalid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Failure reported by a seed source.  Always recovered from with defaults.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("no measurement device available")]
    NoDevice,

    #[error("measurement failed: {0}")]
    Measurement(String),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open log file {path}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
