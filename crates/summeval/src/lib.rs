//! Summeval library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`SummaryEvaluator`], [`EvaluationReport`] - End-to-end evaluation
//! - [`VideoCatalog`], [`Video`] - Reference summaries served by the API
//!
//! ## Scoring
//! - [`SimilarityScorer`], [`ScoringMethod`] - Embedding or lexical similarity
//! - [`MiniLmEmbedder`], [`MiniLmConfig`] - Sentence embeddings
//! - [`FeedbackScale`], [`PerformanceLevel`] - Score-to-feedback mapping
//!
//! ## Utilities
//! Pure helpers in [`similarity`] (cosine, Jaccard, word counts) have no
//! model dependency and can be used on their own.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod evaluation;
pub mod feedback;
pub mod scoring;
pub mod similarity;

pub use catalog::{CatalogError, Video, VideoCatalog};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_MAX_BATCH_SIZE, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, SUMMEVAL_STATUS_EVALUATED,
    SUMMEVAL_STATUS_HEADER, SUMMEVAL_STATUS_HEALTHY, SUMMEVAL_STATUS_READY, SummevalStatus,
};
pub use embedding::{DeviceRequest, EmbeddingError, MiniLmConfig, MiniLmEmbedder};
pub use evaluation::{
    BatchReport, DetailedMetrics, EvaluationReport, LengthAnalysis, ScoreSummary,
    SummaryEvaluator,
};
pub use feedback::{FeedbackScale, PerformanceLevel};
pub use scoring::{ScoringError, ScoringMethod, SimilarityScorer};
pub use similarity::{
    content_words, cosine_similarity, jaccard_similarity, length_ratio, word_count,
};
