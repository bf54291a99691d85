use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::embedding::EmbeddingError;
use crate::ocr::OcrError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Neither the text field nor OCR produced any characters.
    #[error("no text found")]
    NoTextFound,

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),
}
