//! Error types for batch assembly.

use std::path::PathBuf;

use matrixshapes_core::{ConfigError, GenerateError};
use thiserror::Error;

/// Errors that can occur while assembling or writing a task.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A non-recoverable generator failure.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The attempt budget ran out before every slot was filled.
    #[error("gave up after {attempts} attempts with {accepted} of {requested} examples")]
    AttemptsExhausted {
        attempts: usize,
        accepted: usize,
        requested: usize,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode task: {0}")]
    Json(#[from] serde_json::Error),
}
