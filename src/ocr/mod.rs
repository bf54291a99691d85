//! Text extraction from uploaded images.
//!
//! [`TextRecognizer`] is the seam between the pipeline and the OCR engine. The
//! production backend is [`TesseractRecognizer`], which runs the `tesseract`
//! executable against a [`ScratchImage`] written for that single call.
//!
//! Recognizers return fragments in reading order; callers must not reorder them.

pub mod error;
pub mod image;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scratch;
pub mod tesseract;


pub use error::OcrError;
pub use image::ImageFormat;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRecognizer;
pub use scratch::ScratchImage;
pub use tesseract::{TesseractConfig, TesseractRecognizer};

/// Extracts ordered text fragments from image bytes.
///
/// Implementations are shared across request threads and must not keep
/// per-request state.
pub trait TextRecognizer: Send + Sync {
    /// Recognized fragments in reading order. An image without text yields an
    /// empty vector, not an error.
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError>;

    /// Engine name for logs and the readiness report.
    fn engine_name(&self) -> &'static str;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for std::sync::Arc<T> {
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        (**self).recognize(image)
    }

    fn engine_name(&self) -> &'static str {
        (**self).engine_name()
    }
}
