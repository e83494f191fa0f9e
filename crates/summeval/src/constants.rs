//! Cross-cutting, shared constants.
//!
//! Score cut points live with the scales in [`crate::feedback`]; this module
//! holds model shapes, response rounding, and the status header vocabulary.

/// Output dimension of all-MiniLM-L6-v2.
pub const MINILM_EMBEDDING_DIM: usize = 384;

/// Max tokens the sentence encoder considers (longer input is truncated).
pub const MINILM_MAX_SEQ_LEN: usize = 256;

pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Decimal places used when reporting similarity scores.
pub const SCORE_DECIMALS: i32 = 3;
pub const RATIO_DECIMALS: i32 = 2;
pub const PERCENT_DECIMALS: i32 = 1;

/// Length ratios outside `[SHORT_SUMMARY_RATIO, LONG_SUMMARY_RATIO]` get length feedback.
pub const SHORT_SUMMARY_RATIO: f32 = 0.3;
pub const LONG_SUMMARY_RATIO: f32 = 2.0;

pub const SERVICE_NAME: &str = "Video Summary Evaluator";

pub const SUMMEVAL_STATUS_HEADER: &str = "x-summeval-status";
pub const SUMMEVAL_STATUS_HEALTHY: &str = "healthy";
pub const SUMMEVAL_STATUS_READY: &str = "ready";
pub const SUMMEVAL_STATUS_EVALUATED: &str = "evaluated";
pub const SUMMEVAL_STATUS_ERROR: &str = "error";

/// Outcome tag attached to successful API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummevalStatus {
    Evaluated,
    Scored,
    BatchEvaluated,
    Listed,
}

impl SummevalStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            SummevalStatus::Evaluated => SUMMEVAL_STATUS_EVALUATED,
            SummevalStatus::Scored => "scored",
            SummevalStatus::BatchEvaluated => "batch_evaluated",
            SummevalStatus::Listed => "listed",
        }
    }
}

impl std::fmt::Display for SummevalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

/// Rounds `value` half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f64.powi(decimals);
    ((value as f64 * factor).round() / factor) as f32
}
