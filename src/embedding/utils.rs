use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Loads `tokenizer.json` from a checkpoint directory, truncating every encoding to
/// `max_len` tokens and never padding.
pub fn load_tokenizer(model_dir: &Path, max_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let path = model_dir.join("tokenizer.json");
    let mut tokenizer =
        Tokenizer::from_file(&path).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("tokenizer {}: {}", path.display(), e),
        })?;

    // Longer inputs would overrun the encoder's position table.
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_len,
            ..Default::default()
        }))
        .map_err(|e| EmbeddingError::InvalidConfig {
            reason: format!("tokenizer truncation: {}", e),
        })?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}
