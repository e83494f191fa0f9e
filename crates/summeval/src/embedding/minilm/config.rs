use std::path::PathBuf;

use crate::constants::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN};
use crate::embedding::device::DeviceRequest;
use crate::embedding::error::EmbeddingError;

pub const CONFIG_FILE: &str = "config.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

#[derive(Debug, Clone)]
/// Configuration for [`MiniLmEmbedder`](super::MiniLmEmbedder).
pub struct MiniLmConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output embedding dimension (replaced by the model's hidden size on load).
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
    /// Compute device for the model backend; ignored in stub mode.
    pub device: DeviceRequest,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
            testing_stub: false,
            device: DeviceRequest::Auto,
        }
    }
}

impl MiniLmConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_PATH: &'static str = "SUMMEVAL_MODEL_PATH";

    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces hashed bag-of-words vectors).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Reads the model directory from the environment, falling back to stub mode.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .unwrap_or_else(Self::stub)
    }

    pub fn with_device(mut self, device: DeviceRequest) -> Self {
        self.device = device;
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.model_dir.join(CONFIG_FILE)
    }

    pub fn weights_file(&self) -> PathBuf {
        self.model_dir.join(WEIGHTS_FILE)
    }

    pub fn tokenizer_file(&self) -> PathBuf {
        self.model_dir.join(TOKENIZER_FILE)
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 || self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len and embedding_dim must be non-zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        for path in [self.config_file(), self.weights_file(), self.tokenizer_file()] {
            if !path.is_file() {
                return Err(EmbeddingError::ModelNotFound { path });
            }
        }

        Ok(())
    }
}
