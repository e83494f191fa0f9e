use tracing::{debug, instrument};

use crate::embedding::{MiniLmConfig, MiniLmEmbedder};
use crate::similarity::{cosine_similarity, jaccard_similarity};

use super::error::ScoringError;
use super::method::ScoringMethod;

/// Computes a `[0, 1]` similarity between a user summary and a reference.
pub struct SimilarityScorer {
    embedder: MiniLmEmbedder,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("embedder", &self.embedder)
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(config: MiniLmConfig) -> Result<Self, ScoringError> {
        let embedder = MiniLmEmbedder::load(config)?;
        Ok(Self { embedder })
    }

    pub fn with_embedder(embedder: MiniLmEmbedder) -> Self {
        Self { embedder }
    }

    pub fn stub() -> Self {
        Self {
            embedder: MiniLmEmbedder::stub(),
        }
    }

    pub fn embedder(&self) -> &MiniLmEmbedder {
        &self.embedder
    }

    pub fn is_embedder_stub(&self) -> bool {
        self.embedder.is_stub()
    }

    /// Scores `user_text` against `reference_text`.
    ///
    /// Both texts must contain at least one non-whitespace character.
    #[instrument(skip(self, user_text, reference_text), fields(user_len = user_text.len(), reference_len = reference_text.len()))]
    pub fn score(
        &self,
        user_text: &str,
        reference_text: &str,
        method: ScoringMethod,
    ) -> Result<f32, ScoringError> {
        if user_text.trim().is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "user text is empty".to_string(),
            });
        }
        if reference_text.trim().is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "reference text is empty".to_string(),
            });
        }

        let score = match method {
            ScoringMethod::Embedding => self.embedding_similarity(user_text, reference_text)?,
            ScoringMethod::Lexical => jaccard_similarity(user_text, reference_text),
        };

        if !score.is_finite() {
            return Err(ScoringError::ComputationFailed {
                reason: format!("non-finite {} similarity", method),
            });
        }

        debug!(%method, score, "Similarity computed");
        Ok(score)
    }

    /// Cosine similarity of the two sentence embeddings, clamped to `[0, 1]`.
    pub fn embedding_similarity(
        &self,
        user_text: &str,
        reference_text: &str,
    ) -> Result<f32, ScoringError> {
        let (reference, user) = self.embedder.embed_pair(reference_text, user_text)?;
        let cosine = cosine_similarity(&user, &reference);
        Ok(cosine.clamp(0.0, 1.0))
    }
}
