use std::path::PathBuf;

use thiserror::Error;
use wingman_sim::ScenarioError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("failed to read command script {}: {source}", .path.display())]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse command script: {0}")]
    ScriptJson(#[from] serde_json::Error),

    #[error("invalid run options: {0}")]
    Options(String),

    #[error("failed to write snapshot: {0}")]
    Output(#[from] std::io::Error),
}
