use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

/// Weight prefixes seen in exported BERT checkpoints, tried in order.
const WEIGHT_PREFIXES: [&str; 2] = ["bert", "roberta"];

/// Bare BERT encoder producing per-token hidden states.
///
/// sentence-transformers exports store weights without a prefix, Hugging Face
/// task checkpoints nest them under `bert.`; both load.
pub struct BertEncoder {
    model: BertModel,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load(config_path: &Path, weights_path: &Path, device: &Device) -> Result<Self> {
        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let prefix = WEIGHT_PREFIXES
            .into_iter()
            .find(|p| vb.contains_tensor(&format!("{p}.embeddings.word_embeddings.weight")));

        let model = match prefix {
            Some(p) => BertModel::load(vb.pp(p), &config)?,
            None => BertModel::load(vb, &config)?,
        };

        Ok(Self {
            model,
            hidden_size: config.hidden_size,
        })
    }

    /// Returns hidden states shaped `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.model
            .forward(input_ids, token_type_ids, attention_mask)
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }
}
