//! Error types for the host side of the game
//!
//! The simulation itself never fails: collecting, moving and colliding are
//! all normal transitions. Only configuration loading and terminal I/O can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or validating a [`crate::Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure that ends a session abnormally
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("render failed: {0}")]
    Render(#[source] io::Error),
    #[error("terminal setup failed: {0}")]
    Terminal(#[source] io::Error),
}
