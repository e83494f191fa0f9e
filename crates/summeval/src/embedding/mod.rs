//! Sentence embeddings.
//!
//! - [`minilm`] turns a string into a fixed-size, L2-normalised vector.
//! - [`bert`] wraps the candle BERT encoder used underneath.

/// BERT encoder wrapper (weights + forward pass).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// MiniLM sentence embedder.
pub mod minilm;
/// Tokenizer loading helpers.
pub mod utils;

pub use device::DeviceRequest;
pub use error::EmbeddingError;
pub use minilm::{MiniLmConfig, MiniLmEmbedder};
