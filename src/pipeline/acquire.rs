use tracing::debug;

use super::error::PipelineError;
use super::types::AcquiredText;
use crate::ocr::TextRecognizer;

/// Merges caller text with OCR output.
///
/// OCR runs only when an image is present; its fragments are joined with single
/// spaces in the order the recognizer returned them. The combined string is the
/// supplied text, a space, and the OCR text, trimmed at both ends.
pub fn acquire_text<R>(
    text: Option<&str>,
    image: Option<&[u8]>,
    recognizer: &R,
) -> Result<AcquiredText, PipelineError>
where
    R: TextRecognizer + ?Sized,
{
    let extracted = match image {
        Some(bytes) => {
            let fragments = recognizer.recognize(bytes)?;
            debug!(
                engine = recognizer.engine_name(),
                fragments = fragments.len(),
                "Image text recognized"
            );
            fragments.join(" ")
        }
        None => String::new(),
    };

    let combined = format!("{} {}", text.unwrap_or_default(), extracted)
        .trim()
        .to_string();

    Ok(AcquiredText {
        combined,
        extracted,
    })
}
