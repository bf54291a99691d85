use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

mod config_tests {
    use super::*;

    #[test]
    fn test_embedder_config_default() {
        let config = EmbedderConfig::default();
        assert_eq!(config.embedding_dim, 768);
        assert_eq!(config.max_seq_len, EMBEDDER_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_embedder_config_new() {
        let config = EmbedderConfig::new("/models/distilbert-base-uncased");
        assert_eq!(
            config.model_dir,
            PathBuf::from("/models/distilbert-base-uncased")
        );
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_stub_with_dim() {
        let config = EmbedderConfig::stub_with_dim(16);
        assert!(config.testing_stub);
        assert_eq!(config.embedding_dim, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_model_dir() {
        let err = EmbedderConfig::default().validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_validate_missing_model_dir() {
        let err = EmbedderConfig::new("/nonexistent/bert").validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_validate_zero_dim() {
        let err = EmbedderConfig::stub_with_dim(0).validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_file_reports_first_gap() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("config.json"), "{}").expect("write config");

        let config = EmbedderConfig::new(dir.path());
        assert!(!config.model_available());
        assert_eq!(
            config.missing_file(),
            Some(dir.path().join("model.safetensors"))
        );
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn test_load_stub() {
        let embedder = Embedder::load(EmbedderConfig::stub()).expect("stub loads");
        assert!(embedder.is_stub());
        assert_eq!(embedder.mode(), "stub");
        assert_eq!(embedder.embedding_dim(), 768);
    }

    #[test]
    fn test_load_incomplete_model_dir_fails() {
        let dir = TempDir::new().expect("temp dir");
        let err = Embedder::load(EmbedderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_load_corrupt_weights_fails() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("config.json"), "{}").expect("write");
        std::fs::write(dir.path().join("model.safetensors"), b"not safetensors").expect("write");
        std::fs::write(dir.path().join("tokenizer.json"), "{}").expect("write");

        let err = Embedder::load(EmbedderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelLoadFailed { .. }));
    }

    #[test]
    fn test_debug_output() {
        let embedder = Embedder::load(EmbedderConfig::stub_with_dim(8)).expect("stub loads");
        let debug_str = format!("{:?}", embedder);
        assert!(debug_str.contains("Embedder"));
        assert!(debug_str.contains("stub"));
    }
}

mod checkpoint_tests {
    use super::*;
    use crate::embedding::bert::Architecture;
    use candle_core::DType;
    use candle_nn::{VarBuilder, VarMap};
    use candle_transformers::models::{bert, distilbert};
    use serde_json::json;
    use std::path::Path;

    const HIDDEN: usize = 16;

    fn tokenizer_json() -> serde_json::Value {
        json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": {
                    "[UNK]": 0,
                    "scientists": 1,
                    "confirm": 2,
                    "flat": 3,
                    "earth": 4,
                    "markets": 5,
                    "rally": 6,
                    "today": 7
                },
                "unk_token": "[UNK]"
            }
        })
    }

    fn write_files(dir: &Path, config: &serde_json::Value, varmap: &VarMap) {
        std::fs::write(dir.join("config.json"), config.to_string()).expect("write config");
        std::fs::write(dir.join("tokenizer.json"), tokenizer_json().to_string())
            .expect("write tokenizer");
        varmap
            .save(dir.join("model.safetensors"))
            .expect("write weights");
    }

    fn tiny_bert(dir: &Path) {
        let config = json!({
            "model_type": "bert",
            "vocab_size": 32,
            "hidden_size": HIDDEN,
            "num_hidden_layers": 2,
            "num_attention_heads": 2,
            "intermediate_size": 32,
            "hidden_act": "gelu",
            "hidden_dropout_prob": 0.0,
            "max_position_embeddings": 64,
            "type_vocab_size": 2,
            "initializer_range": 0.02,
            "layer_norm_eps": 1e-12,
            "pad_token_id": 0
        });
        let parsed: bert::Config = serde_json::from_value(config.clone()).expect("bert config");

        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &candle_core::Device::Cpu);
        bert::BertModel::load(vb, &parsed).expect("init bert");
        write_files(dir, &config, &varmap);
    }

    fn tiny_distilbert(dir: &Path) {
        let config = json!({
            "model_type": "distilbert",
            "vocab_size": 32,
            "dim": HIDDEN,
            "n_layers": 2,
            "n_heads": 2,
            "hidden_dim": 32,
            "activation": "gelu",
            "max_position_embeddings": 64,
            "initializer_range": 0.02,
            "pad_token_id": 0
        });
        let parsed: distilbert::Config =
            serde_json::from_value(config.clone()).expect("distilbert config");

        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &candle_core::Device::Cpu);
        distilbert::DistilBertModel::load(vb, &parsed).expect("init distilbert");
        write_files(dir, &config, &varmap);
    }

    fn assert_embeds(embedder: &Embedder) {
        assert_eq!(embedder.mode(), "model");
        assert_eq!(embedder.embedding_dim(), HIDDEN);

        let a = embedder.embed("scientists confirm flat earth").expect("embeds");
        assert_eq!(a.len(), HIDDEN);
        assert!(a.iter().all(|x| x.is_finite()));

        let again = embedder.embed("scientists confirm flat earth").expect("embeds");
        assert_eq!(a, again);

        let b = embedder.embed("markets rally today").expect("embeds");
        assert_eq!(b.len(), HIDDEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_load_and_embed_bert_checkpoint() {
        let dir = TempDir::new().expect("temp dir");
        tiny_bert(dir.path());

        let embedder = Embedder::load(EmbedderConfig::new(dir.path())).expect("bert loads");
        assert_eq!(embedder.architecture(), Some(Architecture::Bert));
        assert_embeds(&embedder);
    }

    #[test]
    fn test_load_and_embed_distilbert_checkpoint() {
        let dir = TempDir::new().expect("temp dir");
        tiny_distilbert(dir.path());

        let embedder =
            Embedder::load(EmbedderConfig::new(dir.path())).expect("distilbert loads");
        assert_eq!(embedder.architecture(), Some(Architecture::DistilBert));
        assert_embeds(&embedder);
    }

    #[test]
    fn test_distilbert_config_against_bert_weights_fails() {
        let dir = TempDir::new().expect("temp dir");
        tiny_bert(dir.path());
        let config = json!({
            "model_type": "distilbert",
            "vocab_size": 32,
            "dim": HIDDEN,
            "n_layers": 2,
            "n_heads": 2,
            "hidden_dim": 32,
            "activation": "gelu",
            "max_position_embeddings": 64,
            "initializer_range": 0.02,
            "pad_token_id": 0
        });
        std::fs::write(dir.path().join("config.json"), config.to_string()).expect("write");

        let err = Embedder::load(EmbedderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelLoadFailed { .. }));
    }

    #[test]
    fn test_stub_has_no_architecture() {
        let embedder = Embedder::load(EmbedderConfig::stub_with_dim(8)).expect("stub loads");
        assert_eq!(embedder.architecture(), None);
    }
}

mod stub_embedding_tests {
    use super::*;

    fn stub() -> Embedder {
        Embedder::load(EmbedderConfig::stub_with_dim(32)).expect("stub loads")
    }

    #[test]
    fn test_stub_dimension() {
        let embedding = stub().embed("hello").expect("embeds");
        assert_eq!(embedding.len(), 32);
    }

    #[test]
    fn test_stub_is_deterministic() {
        let embedder = stub();
        let a = embedder.embed("Scientists confirm flat earth").expect("embeds");
        let b = embedder.embed("Scientists confirm flat earth").expect("embeds");
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_differs_by_text() {
        let embedder = stub();
        let a = embedder.embed("first headline").expect("embeds");
        let b = embedder.embed("second headline").expect("embeds");
        assert_ne!(a, b);
    }

    #[test]
    fn test_stub_is_unit_norm() {
        let embedding = stub().embed("normalize me").expect("embeds");
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
    }

    #[test]
    fn test_batch_preserves_order() {
        let embedder = stub();
        let batch = embedder
            .embed_batch(&["one", "two", "three"])
            .expect("embeds");

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[1], embedder.embed("two").expect("embeds"));
    }

    #[test]
    fn test_empty_batch() {
        let batch = stub().embed_batch(&[]).expect("embeds");
        assert!(batch.is_empty());
    }
}

#[test]
fn test_request_time_errors_are_inference_errors() {
    let err = EmbeddingError::TokenizationFailed {
        reason: "bad input".to_string(),
    };
    assert!(err.is_inference_error());

    let err = EmbeddingError::ModelNotFound {
        path: PathBuf::from("/models/missing"),
    };
    assert!(!err.is_inference_error());
}
