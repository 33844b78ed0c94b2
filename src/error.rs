use thiserror::Error;

use crate::config::ConfigError;
use crate::graph::GraphError;
use crate::narrative::NarrativeError;

/// Top-level failure of a run. Every variant is fatal.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Narrative error: {0}")]
    Narrative(#[from] NarrativeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
