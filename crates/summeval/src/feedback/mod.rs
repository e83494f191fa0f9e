//! Score-to-feedback mapping.
//!
//! Embedding cosines and Jaccard overlaps live on different scales (a 0.5
//! Jaccard is a strong match, a 0.5 cosine is middling), so each
//! [`ScoringMethod`] has its own [`FeedbackScale`]. All cut points are
//! half-open: a score equal to a cut belongs to the band above it.


use serde::{Deserialize, Serialize};

use crate::constants::{LONG_SUMMARY_RATIO, SHORT_SUMMARY_RATIO};
use crate::scoring::ScoringMethod;

/// Qualitative grade for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceLevel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl PerformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Poor => "Poor",
            PerformanceLevel::Fair => "Fair",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feedback message applying to scores below `below`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackBand {
    pub below: f32,
    pub message: &'static str,
}

/// Thresholds and wording for one scoring method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackScale {
    /// Scores below this are `Poor`.
    pub fair_from: f32,
    /// Scores below this (and at least `fair_from`) are `Fair`.
    pub good_from: f32,
    /// Scores at or above this are `Excellent`.
    pub excellent_from: f32,
    /// Scores below this get the "connect the ideas" recommendations.
    pub refine_below: f32,
    /// Ascending bands; the first band whose `below` exceeds the score wins.
    pub bands: &'static [FeedbackBand],
    /// Message for scores past the last band.
    pub top_message: &'static str,
}

const EMBEDDING_BANDS: &[FeedbackBand] = &[
    FeedbackBand {
        below: 0.3,
        message: "❌ Your understanding seems quite different from the video content. Consider rewatching and focusing on the main concepts.",
    },
    FeedbackBand {
        below: 0.5,
        message: "⚠️ You've captured some aspects, but there's room for improvement. Try to identify the key themes and main points.",
    },
    FeedbackBand {
        below: 0.65,
        message: "👍 You're getting there! You've understood several important points. Focus on connecting the main ideas.",
    },
    FeedbackBand {
        below: 0.8,
        message: "✅ Good job! You've understood most of the video content well. Minor details could be refined.",
    },
];

const LEXICAL_BANDS: &[FeedbackBand] = &[
    FeedbackBand {
        below: 0.2,
        message: "📚 Your summary needs improvement. Focus on main ideas.",
    },
    FeedbackBand {
        below: 0.4,
        message: "📝 Fair attempt. Try to include more key concepts.",
    },
    FeedbackBand {
        below: 0.6,
        message: "👍 Good work! Your summary covers most important points.",
    },
];

pub const EMBEDDING_SCALE: FeedbackScale = FeedbackScale {
    fair_from: 0.3,
    good_from: 0.5,
    excellent_from: 0.8,
    refine_below: 0.7,
    bands: EMBEDDING_BANDS,
    top_message: "🌟 Excellent! You have a comprehensive understanding of the video content.",
};

pub const LEXICAL_SCALE: FeedbackScale = FeedbackScale {
    fair_from: 0.2,
    good_from: 0.4,
    excellent_from: 0.6,
    refine_below: 0.6,
    bands: LEXICAL_BANDS,
    top_message: "🌟 Excellent! Your summary captures the key concepts very well.",
};

pub const REC_MAIN_TOPIC: &str = "Focus on identifying the main topic and key concepts";
pub const REC_THEMES: &str = "Pay attention to repeated themes or emphasized points";
pub const REC_CONNECT: &str = "Try to connect different parts of the video content";
pub const REC_CAUSE_EFFECT: &str = "Look for cause-and-effect relationships";
pub const REC_MORE_DETAIL: &str = "Include more specific details and examples";
pub const REC_ESSENTIALS: &str = "Focus on the most essential information";
pub const REC_NO_MINOR: &str = "Avoid including minor details";
pub const REC_EXCELLENT: &str = "Excellent work! Continue practicing with more complex content";

pub const LENGTH_BRIEF: &str = "Your summary is quite brief. Consider adding more key details.";
pub const LENGTH_DETAILED: &str =
    "Your summary is quite detailed. Try to focus on the most important points.";
pub const LENGTH_APPROPRIATE: &str = "Your summary length is appropriate.";

impl FeedbackScale {
    pub fn for_method(method: ScoringMethod) -> &'static FeedbackScale {
        match method {
            ScoringMethod::Embedding => &EMBEDDING_SCALE,
            ScoringMethod::Lexical => &LEXICAL_SCALE,
        }
    }

    pub fn performance_level(&self, score: f32) -> PerformanceLevel {
        if score < self.fair_from {
            PerformanceLevel::Poor
        } else if score < self.good_from {
            PerformanceLevel::Fair
        } else if score < self.excellent_from {
            PerformanceLevel::Good
        } else {
            PerformanceLevel::Excellent
        }
    }

    pub fn feedback_message(&self, score: f32) -> &'static str {
        self.bands
            .iter()
            .find(|band| score < band.below)
            .map(|band| band.message)
            .unwrap_or(self.top_message)
    }

    /// Advice derived from the score and the user/reference length ratio.
    pub fn recommendations(&self, score: f32, length_ratio: f32) -> Vec<&'static str> {
        let mut recommendations = Vec::new();

        if score < self.good_from {
            recommendations.push(REC_MAIN_TOPIC);
            recommendations.push(REC_THEMES);
        }

        if score < self.refine_below {
            recommendations.push(REC_CONNECT);
            recommendations.push(REC_CAUSE_EFFECT);
        }

        if length_ratio < SHORT_SUMMARY_RATIO {
            recommendations.push(REC_MORE_DETAIL);
        } else if length_ratio > LONG_SUMMARY_RATIO {
            recommendations.push(REC_ESSENTIALS);
            recommendations.push(REC_NO_MINOR);
        }

        if score >= self.excellent_from {
            recommendations.push(REC_EXCELLENT);
        }

        recommendations
    }
}

/// Comment on summary length relative to the reference.
pub fn length_feedback(length_ratio: f32) -> &'static str {
    if length_ratio < SHORT_SUMMARY_RATIO {
        LENGTH_BRIEF
    } else if length_ratio > LONG_SUMMARY_RATIO {
        LENGTH_DETAILED
    } else {
        LENGTH_APPROPRIATE
    }
}
