use std::path::PathBuf;
use thiserror::Error;

/// Why a single result file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A result document whose `result_data.run_identity` cannot be used as a grouping key.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("missing `result_data.run_identity`")]
    Missing,
    #[error("invalid `result_data.run_identity`: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
