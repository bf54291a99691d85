use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier artifact not found at path: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to read classifier artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse classifier artifact: {0}")]
    ArtifactParse(#[from] serde_json::Error),

    #[error("invalid classifier artifact: {reason}")]
    InvalidArtifact { reason: String },

    #[error("dimension mismatch: classifier expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
