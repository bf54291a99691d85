use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image upload is empty")]
    EmptyImage,

    #[error("unsupported or corrupt image data")]
    UnsupportedFormat,

    #[error("OCR engine '{binary}' is unavailable: {reason}")]
    EngineUnavailable { binary: PathBuf, reason: String },

    #[error("OCR language '{language}' is not installed")]
    LanguageUnavailable { language: String },

    #[error("OCR engine failed ({status}): {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("failed to stage image for OCR: {0}")]
    Scratch(#[from] std::io::Error),
}

impl OcrError {
    /// `true` when the caller's image is at fault rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OcrError::EmptyImage | OcrError::UnsupportedFormat | OcrError::EngineFailed { .. }
        )
    }
}
