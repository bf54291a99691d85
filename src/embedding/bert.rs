use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::VarBuilder;
use candle_transformers::models::{bert, distilbert};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Encoder family named by `model_type` in `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bert,
    DistilBert,
}

impl Architecture {
    /// Anything other than `distilbert` is read as a BERT config.
    pub fn from_model_type(model_type: Option<&str>) -> Self {
        match model_type {
            Some(kind) if kind.eq_ignore_ascii_case("distilbert") => Self::DistilBert,
            _ => Self::Bert,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bert => "bert",
            Self::DistilBert => "distilbert",
        }
    }
}

#[derive(Deserialize)]
struct ModelType {
    #[serde(default)]
    model_type: Option<String>,
}

enum Backbone {
    Bert(bert::BertModel),
    DistilBert(distilbert::DistilBertModel),
}

struct BertEncoderImpl {
    backbone: Backbone,
    architecture: Architecture,
    hidden_size: usize,
}

fn parse_config<T: serde::de::DeserializeOwned>(content: &str) -> Result<T> {
    serde_json::from_str(content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}

impl BertEncoderImpl {
    fn load(vb: VarBuilder, config_content: &str) -> Result<Self> {
        let ModelType { model_type } = parse_config(config_content)?;
        let architecture = Architecture::from_model_type(model_type.as_deref());

        match architecture {
            Architecture::Bert => {
                let config: bert::Config = parse_config(config_content)?;
                // Fine-tuned checkpoints nest the encoder under a task prefix.
                let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
                    bert::BertModel::load(vb.pp("bert"), &config)?
                } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
                    bert::BertModel::load(vb.pp("roberta"), &config)?
                } else {
                    bert::BertModel::load(vb, &config)?
                };
                Ok(Self {
                    backbone: Backbone::Bert(model),
                    architecture,
                    hidden_size: config.hidden_size,
                })
            }
            Architecture::DistilBert => {
                let config: distilbert::Config = parse_config(config_content)?;
                let model = distilbert::DistilBertModel::load(vb, &config)?;
                Ok(Self {
                    backbone: Backbone::DistilBert(model),
                    architecture,
                    hidden_size: config.dim,
                })
            }
        }
    }

    /// Returns the first-token hidden state for a single `[1, seq_len]` input.
    fn cls_embedding(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let output = match &self.backbone {
            Backbone::Bert(model) => {
                model.forward(input_ids, token_type_ids, Some(attention_mask))?
            }
            Backbone::DistilBert(model) => {
                // DistilBERT masks positions where the mask is nonzero, shaped
                // to broadcast over (batch, heads, query, key).
                let padding = attention_mask.eq(0u32)?.unsqueeze(1)?.unsqueeze(1)?;
                model.forward(input_ids, &padding)?
            }
        };
        output.i((0, 0))
    }
}

/// Shared, immutable BERT-family encoder. Cloning is cheap.
#[derive(Clone)]
pub struct BertEncoder(Arc<BertEncoderImpl>);

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = BertEncoderImpl::load(vb, &config_content)?;

        Ok(Self(Arc::new(model)))
    }

    pub fn hidden_size(&self) -> usize {
        self.0.hidden_size
    }

    pub fn architecture(&self) -> Architecture {
        self.0.architecture
    }

    /// DistilBERT ignores `token_type_ids`.
    pub fn cls_embedding(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0.cls_embedding(input_ids, token_type_ids, attention_mask)
    }
}
