//! Text embedding.
//!
//! - [`embedder`] turns a string into the fixed-length vector the classifier consumes.
//! - [`bert`] wraps the candle BERT and DistilBERT encoders used by the real backend.

/// BERT-family encoder wrapper used by the embedder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Text embedder (BERT or deterministic stub).
pub mod embedder;
mod error;
/// Tokenizer loading.
pub mod utils;

pub use embedder::{EMBEDDER_MAX_SEQ_LEN, Embedder, EmbedderConfig};
pub use error::EmbeddingError;
