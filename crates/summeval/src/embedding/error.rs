use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or running the sentence encoder.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Model directory, or one of its three files, is missing.
    #[error("embedding model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load embedding model: {reason}")]
    ModelLoadFailed { reason: String },

    /// An explicitly requested GPU backend is not compiled in or failed to initialise.
    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Tensor errors only surface during the forward pass and pooling.
impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
