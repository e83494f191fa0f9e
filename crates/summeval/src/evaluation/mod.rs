//! End-to-end evaluation: score, grade, and explain a user summary.

mod types;


pub use types::{BatchReport, DetailedMetrics, EvaluationReport, LengthAnalysis, ScoreSummary};

use tracing::{debug, info};

use crate::constants::{PERCENT_DECIMALS, RATIO_DECIMALS, SCORE_DECIMALS, round_to};
use crate::feedback::{FeedbackScale, length_feedback};
use crate::scoring::{ScoringError, ScoringMethod, SimilarityScorer};
use crate::similarity::{length_ratio, word_count};

/// Scores summaries and turns the score into feedback.
///
/// Holds the sentence embedder, so build it once and share it (`Arc`).
#[derive(Debug)]
pub struct SummaryEvaluator {
    scorer: SimilarityScorer,
    default_method: ScoringMethod,
}

impl SummaryEvaluator {
    pub fn new(scorer: SimilarityScorer, default_method: ScoringMethod) -> Self {
        Self {
            scorer,
            default_method,
        }
    }

    /// Stub embedder, embedding method by default.
    pub fn stub() -> Self {
        Self::new(SimilarityScorer::stub(), ScoringMethod::Embedding)
    }

    pub fn default_method(&self) -> ScoringMethod {
        self.default_method
    }

    /// Returns `method`, or the configured default when `None`.
    pub fn resolve_method(&self, method: Option<ScoringMethod>) -> ScoringMethod {
        method.unwrap_or(self.default_method)
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    pub fn is_embedder_stub(&self) -> bool {
        self.scorer.is_embedder_stub()
    }

    /// Raw (unrounded) similarity in `[0, 1]`.
    pub fn similarity(
        &self,
        user_text: &str,
        reference_text: &str,
        method: ScoringMethod,
    ) -> Result<f32, ScoringError> {
        self.scorer.score(user_text, reference_text, method)
    }

    /// Score with performance level and feedback message only.
    pub fn quick_score(
        &self,
        user_text: &str,
        reference_text: &str,
        method: ScoringMethod,
    ) -> Result<ScoreSummary, ScoringError> {
        let score = self.similarity(user_text, reference_text, method)?;
        let scale = FeedbackScale::for_method(method);

        Ok(ScoreSummary {
            similarity_score: round_to(score, SCORE_DECIMALS),
            performance_level: scale.performance_level(score),
            feedback_message: scale.feedback_message(score).to_string(),
        })
    }

    /// Full report: score, grade, feedback, length analysis, recommendations.
    pub fn evaluate(
        &self,
        user_text: &str,
        reference_text: &str,
        method: ScoringMethod,
    ) -> Result<EvaluationReport, ScoringError> {
        let score = self.similarity(user_text, reference_text, method)?;
        let scale = FeedbackScale::for_method(method);
        let performance_level = scale.performance_level(score);

        let user_words = word_count(user_text);
        let reference_words = word_count(reference_text);
        let ratio = length_ratio(user_words, reference_words);

        let similarity_score = round_to(score, SCORE_DECIMALS);
        let percentage = round_to(score * 100.0, PERCENT_DECIMALS);

        debug!(
            %method,
            score = similarity_score,
            level = %performance_level,
            length_ratio = ratio,
            "Summary evaluated"
        );

        Ok(EvaluationReport {
            similarity_score,
            performance_level,
            feedback_message: scale.feedback_message(score).to_string(),
            score_percentage: percentage,
            scoring_method: method,
            length_analysis: LengthAnalysis {
                user_word_count: user_words,
                reference_word_count: reference_words,
                length_ratio: round_to(ratio, RATIO_DECIMALS),
                length_feedback: length_feedback(ratio).to_string(),
            },
            detailed_metrics: DetailedMetrics {
                semantic_similarity: similarity_score,
                comprehensiveness_score: percentage,
                understanding_quality: performance_level,
            },
            recommendations: scale
                .recommendations(score, ratio)
                .into_iter()
                .map(str::to_string)
                .collect(),
            video_context: None,
            comparison_type: None,
            video_title: None,
            video_category: None,
        })
    }

    /// Evaluates pairs position by position.
    ///
    /// Fails on the first invalid pair; the error names its index.
    pub fn batch_evaluate<U, R>(
        &self,
        user_summaries: &[U],
        reference_summaries: &[R],
        method: ScoringMethod,
    ) -> Result<BatchReport, ScoringError>
    where
        U: AsRef<str>,
        R: AsRef<str>,
    {
        if user_summaries.len() != reference_summaries.len() {
            return Err(ScoringError::LengthMismatch {
                users: user_summaries.len(),
                references: reference_summaries.len(),
            });
        }

        let batch_results = user_summaries
            .iter()
            .zip(reference_summaries)
            .enumerate()
            .map(|(idx, (user, reference))| {
                self.evaluate(user.as_ref(), reference.as_ref(), method)
                    .map_err(|e| match e {
                        ScoringError::InvalidInput { reason } => ScoringError::InvalidInput {
                            reason: format!("pair {}: {}", idx, reason),
                        },
                        other => other,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_evaluations = batch_results.len();
        let average_score = if total_evaluations == 0 {
            0.0
        } else {
            let sum: f32 = batch_results.iter().map(|r| r.similarity_score).sum();
            sum / total_evaluations as f32
        };

        info!(
            %method,
            total = total_evaluations,
            average = average_score,
            "Batch evaluation complete"
        );

        Ok(BatchReport {
            batch_results,
            total_evaluations,
            average_score,
        })
    }
}
