//! Scenario loading errors.

use std::path::PathBuf;

use thiserror::Error;
use wingman_flight::ConfigError;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("aircraft {name}: {source}")]
    Aircraft {
        name: String,
        #[source]
        source: ConfigError,
    },

    #[error("invalid scenario: {0}")]
    Invalid(String),
}
