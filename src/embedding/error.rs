use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the embedder or embedding a request's text.
///
/// Load-time variants stop the process at startup; `TokenizationFailed` and
/// `InferenceFailed` surface per request as HTTP 500.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The model directory, or one of its required files, is absent.
    #[error("embedder file not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("could not load embedder weights: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("tokenizer error: {reason}")]
    TokenizationFailed { reason: String },

    #[error("encoder forward pass failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl EmbeddingError {
    /// `true` for errors raised while handling a request rather than at load time.
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            EmbeddingError::TokenizationFailed { .. } | EmbeddingError::InferenceFailed { .. }
        )
    }
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
