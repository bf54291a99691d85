//! Cross-cutting, shared constants.
//!
//! The fusion weights, label threshold and source scores are part of the response
//! contract: clients compare `final_score` values across deployments, so these must
//! not drift.
//!
//! # Dimension Invariants
//!
//! The embedder output dimension and the classifier input dimension must agree. The
//! check happens once at startup via [`validate_embedding_dim`]; request handling
//! never re-validates it.

/// Weight of the classifier probability in the fused score.
pub const PROB_WEIGHT: f64 = 0.7;
/// Weight of the source credibility score in the fused score.
pub const CREDIBILITY_WEIGHT: f64 = 0.3;
/// `pred_label` is `1` only when `prob_fake` is strictly greater than this.
pub const LABEL_THRESHOLD: f64 = 0.5;

/// Credibility contribution when no source was supplied.
pub const UNKNOWN_SOURCE_SCORE: f64 = 0.5;
/// Credibility contribution when the source matches a trusted domain.
pub const TRUSTED_SOURCE_SCORE: f64 = 0.1;
/// Credibility contribution for any other source.
pub const UNTRUSTED_SOURCE_SCORE: f64 = 0.8;

pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &["bbc.com", "reuters.com", "theguardian.com"];

/// Hidden size of `distilbert-base-uncased` / `bert-base-uncased`.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// BERT position-embedding limit.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

pub const DEFAULT_OCR_BINARY: &str = "tesseract";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Body returned (with HTTP 200) when neither text nor OCR produced anything.
pub const NO_TEXT_FOUND: &str = "No text found";

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use credence::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let embedder_dim = 768;
/// validate_embedding_dim(embedder_dim, DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
