//! Credence library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Request Path
//! - [`Pipeline`], [`PredictRequest`] - text acquisition, embedding, classification, fusion
//! - [`ScoreResult`], [`FakeLabel`] - response body of `POST /predict`
//! - [`gateway`] - Axum router and handlers
//!
//! ## Models
//! - [`Embedder`], [`EmbedderConfig`] - BERT sentence embedding (or deterministic stub)
//! - [`LogisticRegression`] - fitted fake-news classifier
//! - [`TextRecognizer`], [`TesseractRecognizer`] - OCR over uploaded images
//!
//! ## Scoring
//! - [`TrustTable`], [`source_score`], [`fuse`] - source credibility and score fusion
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod ocr;
pub mod pipeline;
pub mod scoring;

pub use classifier::{ClassifierArtifact, ClassifierError, LogisticRegression};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use embedding::{Embedder, EmbedderConfig, EmbeddingError};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
#[cfg(any(test, feature = "mock"))]
pub use ocr::MockRecognizer;
pub use ocr::{
    ImageFormat, OcrError, ScratchImage, TesseractConfig, TesseractRecognizer, TextRecognizer,
};
pub use pipeline::{AcquiredText, Pipeline, PipelineError, PredictRequest, Stage};
pub use scoring::{FakeLabel, ScoreResult, TrustTable, fuse, predicted_label, source_score};
