//! Similarity scoring between a user summary and a reference summary.
//!
//! Two methods are supported (see [`ScoringMethod`]):
//!
//! - **Embedding**: both texts go through the sentence embedder and the
//!   cosine of the two vectors is reported, clamped to `[0, 1]`.
//! - **Lexical**: Jaccard overlap of content words. No model involved, so it
//!   also works (and is what `/api/evaluate` defaults to) when only the stub
//!   embedder is available.

pub mod error;
pub mod method;
pub mod scorer;


pub use error::ScoringError;
pub use method::ScoringMethod;
pub use scorer::SimilarityScorer;
