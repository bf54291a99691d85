use std::sync::Arc;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use crate::ocr::TextRecognizer;
use crate::pipeline::Pipeline;

/// Shared, read-only state handed to every handler.
pub struct HandlerState<R: TextRecognizer + 'static> {
    pub pipeline: Arc<Pipeline<R>>,

    pub max_upload_bytes: usize,
}

impl<R: TextRecognizer + 'static> Clone for HandlerState<R> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl<R: TextRecognizer + 'static> HandlerState<R> {
    pub fn new(pipeline: Arc<Pipeline<R>>) -> Self {
        Self {
            pipeline,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
