//! Request bodies.
//!
//! Text fields are optional at the serde level so that a missing field and a
//! blank one produce the same "Missing ..." error instead of a schema error.

use serde::Deserialize;

use summeval::scoring::ScoringMethod;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateSummaryRequest {
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub video_summary: Option<String>,
    #[serde(default)]
    pub video_understanding: Option<serde_json::Value>,
    #[serde(default)]
    pub method: Option<ScoringMethod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareTextsRequest {
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub reference_text: Option<String>,
    #[serde(default)]
    pub video_understanding: Option<serde_json::Value>,
    #[serde(default)]
    pub method: Option<ScoringMethod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchEvaluateRequest {
    #[serde(default)]
    pub user_summaries: Vec<String>,
    #[serde(default)]
    pub reference_summaries: Vec<String>,
    #[serde(default)]
    pub method: Option<ScoringMethod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimilarityScoreRequest {
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub reference_text: Option<String>,
    #[serde(default)]
    pub method: Option<ScoringMethod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEvaluateRequest {
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub video_id: Option<u32>,
    #[serde(default)]
    pub reference_summary: Option<String>,
    #[serde(default)]
    pub method: Option<ScoringMethod>,
}

/// Returns the field when it has non-whitespace content.
pub fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|text| !text.trim().is_empty())
}
