use thiserror::Error;

use crate::core::{BlockError, GridError};

/// Errors surfaced by the driver layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Block(#[from] BlockError),
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
