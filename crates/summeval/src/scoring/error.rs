use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("unknown scoring method '{value}': expected 'embedding' or 'lexical'")]
    UnknownMethod { value: String },

    #[error("number of user summaries ({users}) must match reference summaries ({references})")]
    LengthMismatch { users: usize, references: usize },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}

impl ScoringError {
    /// Returns `true` for errors caused by the caller's input rather than the scorer.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScoringError::InvalidInput { .. }
                | ScoringError::UnknownMethod { .. }
                | ScoringError::LengthMismatch { .. }
        )
    }
}
