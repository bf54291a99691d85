//! BERT-family text embedder (BERT or DistilBERT, picked from `config.json`).
//!
//! Use [`EmbedderConfig::stub`] for tests/examples without model files.

/// Embedder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{EMBEDDER_MAX_SEQ_LEN, EmbedderConfig};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::bert::{Architecture, BertEncoder};
use crate::embedding::device::{device_label, select_device};
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Arc<tokenizers::Tokenizer>,
    },
    Stub,
}

/// Turns text into the fixed-length vector consumed by the classifier.
///
/// Immutable after [`Embedder::load`]; share it behind an `Arc`.
pub struct Embedder {
    backend: EmbedderBackend,
    device: Device,
    config: EmbedderConfig,
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("mode", &self.mode())
            .field("architecture", &self.architecture().map(Architecture::as_str))
            .field("device", &device_label(&self.device))
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl Embedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(mut config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for embedder");

        if config.testing_stub {
            warn!(
                embedding_dim = config.embedding_dim,
                "Embedder running in STUB mode (testing only)"
            );
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                device,
                config,
            });
        }

        if let Some(path) = config.missing_file() {
            return Err(EmbeddingError::ModelNotFound { path });
        }

        let encoder = BertEncoder::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load encoder model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len)?;

        config.embedding_dim = encoder.hidden_size();

        info!(
            model_dir = %config.model_dir.display(),
            architecture = encoder.architecture().as_str(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer: Arc::new(tokenizer),
            },
            device,
            config,
        })
    }

    /// Generates an embedding for a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model { encoder, tokenizer } => {
                self.embed_with_model(text, encoder, tokenizer)
            }
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Generates embeddings for a sequence of strings, in input order.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &tokenizers::Tokenizer,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Err(EmbeddingError::TokenizationFailed {
                reason: "tokenizer produced no tokens".to_string(),
            });
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Generating embedding (encoder forward pass)"
        );

        let input_ids = self.row_tensor(encoding.get_ids())?;
        let token_type_ids = self.row_tensor(encoding.get_type_ids())?;
        let attention_mask = self.row_tensor(encoding.get_attention_mask())?;

        let embedding = encoder
            .cls_embedding(&input_ids, &token_type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("encoder forward pass failed: {}", e),
            })?
            .to_vec1::<f32>()?;

        if embedding.len() != self.config.embedding_dim {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "encoder returned {} values, expected {}",
                    embedding.len(),
                    self.config.embedding_dim
                ),
            });
        }

        Ok(embedding)
    }

    /// `[1, len]` tensor from token-level data.
    fn row_tensor(&self, data: &[u32]) -> Result<Tensor, EmbeddingError> {
        Ok(Tensor::new(data, &self.device)?.unsqueeze(0)?)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let digest = blake3::hash(text.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }

        embedding
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// `"stub"` or `"model"`.
    pub fn mode(&self) -> &'static str {
        if self.is_stub() { "stub" } else { "model" }
    }

    /// Encoder family of the loaded model; `None` in stub mode.
    pub fn architecture(&self) -> Option<Architecture> {
        match &self.backend {
            EmbedderBackend::Model { encoder, .. } => Some(encoder.architecture()),
            EmbedderBackend::Stub => None,
        }
    }

    /// Returns the compute device label (`cpu`, `cuda`, `metal`).
    pub fn device(&self) -> &'static str {
        device_label(&self.device)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}
