//! Request-scoped scoring pipeline.
//!
//! ```text
//! RECEIVED -> TEXT_ACQUIRED -+-> EMPTY_TEXT                          (PipelineError::NoTextFound)
//!                            +-> EMBEDDED -> CLASSIFIED -> FUSED     (ScoreResult)
//! ```
//!
//! Every stage is blocking and runs to completion before the next starts. The
//! [`Pipeline`] itself holds only read-only state built at startup, so one instance
//! serves all requests concurrently without locking.

pub mod acquire;
pub mod error;
pub mod types;


pub use acquire::acquire_text;
pub use error::PipelineError;
pub use types::{AcquiredText, PredictRequest, Stage};

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::classifier::{ClassifierError, LogisticRegression};
use crate::embedding::Embedder;
use crate::ocr::TextRecognizer;
use crate::scoring::{ScoreResult, TrustTable, source_score};

/// Loaded collaborators shared by every request.
pub struct Pipeline<R: TextRecognizer> {
    embedder: Arc<Embedder>,
    classifier: Arc<LogisticRegression>,
    recognizer: R,
    trust: TrustTable,
}

impl<R: TextRecognizer> std::fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("embedder", &self.embedder)
            .field("classifier_dim", &self.classifier.input_dim())
            .field("ocr", &self.recognizer.engine_name())
            .field("trusted_domains", &self.trust.len())
            .finish()
    }
}

impl<R: TextRecognizer> Pipeline<R> {
    /// Assembles the pipeline, rejecting an embedder/classifier dimension mismatch.
    pub fn new(
        embedder: Arc<Embedder>,
        classifier: Arc<LogisticRegression>,
        recognizer: R,
        trust: TrustTable,
    ) -> Result<Self, ClassifierError> {
        classifier.ensure_input_dim(embedder.embedding_dim())?;
        Ok(Self {
            embedder,
            classifier,
            recognizer,
            trust,
        })
    }

    /// Runs one request through every stage.
    #[instrument(
        skip(self, request),
        fields(
            has_text = request.text.is_some(),
            has_source = request.source.is_some(),
            image_bytes = request.image.as_ref().map_or(0, Vec::len),
        )
    )]
    pub fn predict(&self, request: PredictRequest) -> Result<ScoreResult, PipelineError> {
        debug!(stage = %Stage::Received, "Pipeline started");

        let acquired = acquire_text(
            request.text.as_deref(),
            request.image.as_deref(),
            &self.recognizer,
        )?;
        if acquired.is_empty() {
            debug!(stage = %Stage::EmptyText, "No text to score");
            return Err(PipelineError::NoTextFound);
        }
        debug!(
            stage = %Stage::TextAcquired,
            combined_len = acquired.combined.len(),
            extracted_len = acquired.extracted.len(),
            "Text acquired"
        );

        let embedding = self.embedder.embed(&acquired.combined)?;
        debug!(stage = %Stage::Embedded, dim = embedding.len(), "Text embedded");

        let prob_fake = self.classifier.predict_proba(&embedding)?;
        debug!(stage = %Stage::Classified, prob_fake = prob_fake, "Embedding classified");

        let credibility = source_score(&self.trust, request.source.as_deref());
        let result = ScoreResult::new(acquired.extracted, prob_fake, credibility);
        debug!(
            stage = %Stage::Fused,
            credibility = credibility,
            final_score = result.final_score,
            pred_label = result.pred_label.as_u8(),
            "Scores fused"
        );

        Ok(result)
    }

    pub fn embedder(&self) -> &Embedder {
        &self.embedder
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn trust_table(&self) -> &TrustTable {
        &self.trust
    }
}
