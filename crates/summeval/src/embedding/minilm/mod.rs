//! MiniLM sentence embedder (BERT encoder + mean pooling).
//!
//! Use [`MiniLmConfig::stub`] for tests and for running without model files.
//! Stub vectors are hashed bags of words: identical texts embed identically
//! and texts that share words point in similar directions, which keeps
//! scoring meaningful (if crude) without a model.

/// MiniLM configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::MiniLmConfig;

use candle_core::{DType, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer_with_truncation;

enum EncoderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence embedder producing L2-normalised vectors.
pub struct MiniLmEmbedder {
    backend: EncoderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(mut config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (hashed bag-of-words)");
            return Ok(Self::stub_with_config(config));
        }

        let device = select_device(config.device)?;
        debug!(?device, "Selected compute device for sentence embedder");

        let encoder = BertEncoder::load(&config.config_file(), &config.weights_file(), &device)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            })?;

        let tokenizer = load_tokenizer_with_truncation(&config.tokenizer_file(), config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        if encoder.hidden_size() != config.embedding_dim {
            info!(
                configured = config.embedding_dim,
                hidden_size = encoder.hidden_size(),
                "Using encoder hidden size as embedding dimension"
            );
            config.embedding_dim = encoder.hidden_size();
        }

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                encoder,
                tokenizer,
                device,
            },
            config,
        })
    }

    /// Stub embedder with default dimensions.
    pub fn stub() -> Self {
        Self::stub_with_config(MiniLmConfig::stub())
    }

    fn stub_with_config(config: MiniLmConfig) -> Self {
        Self {
            backend: EncoderBackend::Stub,
            config,
        }
    }

    /// Embeds a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Embeds two strings, returned in argument order.
    pub fn embed_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<(Vec<f32>, Vec<f32>), EmbeddingError> {
        Ok((self.embed(first)?, self.embed(second)?))
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = ids.len(),
            "Generating embedding"
        );

        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden_states = encoder
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        // Mean over real tokens only: padding positions carry a zero mask.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden_states.broadcast_mul(&mask)?.sum(1)?;
        let token_counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&token_counts)?.squeeze(0)?;

        let embedding = pooled.to_vec1::<f32>()?;
        Ok(normalize(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let dim = self.config.embedding_dim;
        let mut embedding = vec![0.0f32; dim];

        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let digest = blake3::hash(token.as_bytes());
            let bytes = digest.as_bytes();

            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % dim as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };

            embedding[bucket] += sign;
        }

        normalize(embedding)
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
