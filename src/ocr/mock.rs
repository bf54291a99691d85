use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::OcrError;
use super::TextRecognizer;

#[derive(Debug, Clone)]
enum Behavior {
    Fragments(Vec<String>),
    Fail,
}

/// Recognizer returning canned fragments; counts invocations.
#[derive(Debug)]
pub struct MockRecognizer {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockRecognizer {
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            behavior: Behavior::Fragments(fragments.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Recognizer that finds no text in any image.
    pub fn blank() -> Self {
        Self::with_fragments(Vec::<String>::new())
    }

    /// Recognizer that rejects every image as unreadable.
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image.is_empty() {
            return Err(OcrError::EmptyImage);
        }
        match &self.behavior {
            Behavior::Fragments(fragments) => Ok(fragments.clone()),
            Behavior::Fail => Err(OcrError::UnsupportedFormat),
        }
    }

    fn engine_name(&self) -> &'static str {
        "mock"
    }
}
