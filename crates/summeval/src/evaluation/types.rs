use serde::{Deserialize, Serialize};

use crate::catalog::Video;
use crate::feedback::PerformanceLevel;
use crate::scoring::ScoringMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthAnalysis {
    pub user_word_count: usize,
    pub reference_word_count: usize,
    /// `user_word_count / reference_word_count`, 2 decimal places.
    pub length_ratio: f32,
    pub length_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub semantic_similarity: f32,
    /// Similarity as a percentage, 1 decimal place.
    pub comprehensiveness_score: f32,
    pub understanding_quality: PerformanceLevel,
}

/// Full evaluation of one user summary against one reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub similarity_score: f32,
    pub performance_level: PerformanceLevel,
    pub feedback_message: String,
    pub score_percentage: f32,
    pub scoring_method: ScoringMethod,
    pub length_analysis: LengthAnalysis,
    pub detailed_metrics: DetailedMetrics,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_context: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_category: Option<String>,
}

impl EvaluationReport {
    pub fn with_video_context(mut self, context: serde_json::Value) -> Self {
        self.video_context = Some(context);
        self
    }

    pub fn with_comparison_type(mut self, comparison_type: impl Into<String>) -> Self {
        self.comparison_type = Some(comparison_type.into());
        self
    }

    pub fn with_video(mut self, video: &Video) -> Self {
        self.video_title = Some(video.title.clone());
        self.video_category = Some(video.category.clone());
        self
    }
}

/// Score plus the two labels, without length analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub similarity_score: f32,
    pub performance_level: PerformanceLevel,
    pub feedback_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_results: Vec<EvaluationReport>,
    pub total_evaluations: usize,
    /// Plain mean of the reported (rounded) scores; `0.0` for an empty batch.
    pub average_score: f32,
}
