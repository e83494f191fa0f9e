use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use summeval::constants::{SUMMEVAL_STATUS_HEADER, SummevalStatus};
use summeval::evaluation::SummaryEvaluator;
use summeval::scoring::{ScoringError, ScoringMethod};

use crate::gateway::error::GatewayError;
use crate::gateway::request::{
    BatchEvaluateRequest, CatalogEvaluateRequest, CompareTextsRequest, EvaluateSummaryRequest,
    SimilarityScoreRequest, non_blank,
};
use crate::gateway::state::HandlerState;

pub const COMPARISON_TYPE_TEXT: &str = "text_comparison";
const UNKNOWN: &str = "Unknown";

#[instrument(skip(state, payload))]
pub async fn evaluate_summary_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let request: EvaluateSummaryRequest = parse_body(payload)?;

    let user_text = require(request.user_text, "Missing user_text")?;
    let video_summary = require(request.video_summary, "Missing video_summary")?;
    let method = state.evaluator.resolve_method(request.method);

    let mut report = run_evaluator(&state, move |evaluator| {
        evaluator.evaluate(&user_text, &video_summary, method)
    })
    .await?;

    if let Some(understanding) = request.video_understanding.filter(is_present) {
        report = report.with_video_context(serde_json::json!({
            "filename": string_field(&understanding, "filename"),
            "processing_status": string_field(&understanding, "status"),
        }));
    }

    info!(
        %method,
        score = report.similarity_score,
        level = %report.performance_level,
        "Summary evaluated"
    );
    Ok(make_response(SummevalStatus::Evaluated, report))
}

#[instrument(skip(state, payload))]
pub async fn compare_texts_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let request: CompareTextsRequest = parse_body(payload)?;

    let user_text = require(request.user_text, "Missing user_text")?;
    let reference_text = require(request.reference_text, "Missing reference_text")?;
    let method = state.evaluator.resolve_method(request.method);

    let mut report = run_evaluator(&state, move |evaluator| {
        evaluator.evaluate(&user_text, &reference_text, method)
    })
    .await?
    .with_comparison_type(COMPARISON_TYPE_TEXT);

    if let Some(understanding) = request.video_understanding.filter(is_present) {
        report = report.with_video_context(understanding);
    }

    debug!(%method, score = report.similarity_score, "Texts compared");
    Ok(make_response(SummevalStatus::Evaluated, report))
}

#[instrument(skip(state, payload))]
pub async fn batch_evaluate_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let request: BatchEvaluateRequest = parse_body(payload)?;

    if request.user_summaries.is_empty() || request.reference_summaries.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Missing user_summaries or reference_summaries".to_string(),
        ));
    }

    if request.user_summaries.len() != request.reference_summaries.len() {
        return Err(GatewayError::InvalidRequest(
            "Number of user summaries must match reference summaries".to_string(),
        ));
    }

    if request.user_summaries.len() > state.max_batch_size {
        return Err(GatewayError::InvalidRequest(format!(
            "Batch of {} exceeds the maximum of {} summaries",
            request.user_summaries.len(),
            state.max_batch_size
        )));
    }

    let method = state.evaluator.resolve_method(request.method);
    let users = request.user_summaries;
    let references = request.reference_summaries;

    let report = run_evaluator(&state, move |evaluator| {
        evaluator.batch_evaluate(&users, &references, method)
    })
    .await?;

    Ok(make_response(SummevalStatus::BatchEvaluated, report))
}

#[instrument(skip(state, payload))]
pub async fn similarity_score_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let request: SimilarityScoreRequest = parse_body(payload)?;

    let (Some(user_text), Some(reference_text)) = (
        non_blank(request.user_text),
        non_blank(request.reference_text),
    ) else {
        return Err(GatewayError::InvalidRequest(
            "Missing user_text or reference_text".to_string(),
        ));
    };
    let method = state.evaluator.resolve_method(request.method);

    let summary = run_evaluator(&state, move |evaluator| {
        evaluator.quick_score(&user_text, &reference_text, method)
    })
    .await?;

    Ok(make_response(SummevalStatus::Scored, summary))
}

#[instrument(skip(state))]
pub async fn list_videos_handler(State(state): State<HandlerState>) -> Response {
    debug!(videos = state.catalog.len(), "Videos requested");
    make_response(SummevalStatus::Listed, state.catalog.list())
}

#[instrument(skip(state))]
pub async fn get_video_handler(
    State(state): State<HandlerState>,
    Path(video_id): Path<String>,
) -> Result<Response, GatewayError> {
    let video = video_id
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.get(id))
        .ok_or_else(|| GatewayError::NotFound("Video not found".to_string()))?;

    Ok(make_response(SummevalStatus::Listed, video))
}

/// Evaluates against a catalog video, or against a caller-supplied reference.
///
/// Defaults to the lexical method: catalog summaries are long and the
/// word-overlap scale was tuned for them.
#[instrument(skip(state, payload))]
pub async fn catalog_evaluate_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let request: CatalogEvaluateRequest = parse_body(payload)?;

    let user_text = require(request.user_text, "User text is required")?;
    let video_id = request
        .video_id
        .filter(|id| *id != 0)
        .ok_or_else(|| GatewayError::InvalidRequest("Video ID is required".to_string()))?;

    let video = state.catalog.get(video_id).cloned();
    let reference_text = match (non_blank(request.reference_summary), &video) {
        (Some(custom), _) => {
            debug!(video_id, "Using custom reference summary");
            custom
        }
        (None, Some(video)) => video.summary.clone(),
        (None, None) => return Err(GatewayError::NotFound("Video not found".to_string())),
    };
    let method = request.method.unwrap_or(ScoringMethod::Lexical);

    let mut report = run_evaluator(&state, move |evaluator| {
        evaluator.evaluate(&user_text, &reference_text, method)
    })
    .await?;

    if let Some(video) = &video {
        report = report.with_video(video);
    }

    info!(
        video_id,
        %method,
        score = report.similarity_score,
        level = %report.performance_level,
        "Catalog evaluation complete"
    );
    Ok(make_response(SummevalStatus::Evaluated, report))
}

pub async fn not_found_handler() -> GatewayError {
    GatewayError::NotFound("Endpoint not found".to_string())
}

/// Deserializes a JSON body into a request type.
pub(crate) fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, GatewayError> {
    let Json(value) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        GatewayError::InvalidRequest("No JSON data provided".to_string())
    })?;

    if value.is_null() {
        return Err(GatewayError::InvalidRequest(
            "No JSON data provided".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

fn require(field: Option<String>, message: &str) -> Result<String, GatewayError> {
    non_blank(field).ok_or_else(|| GatewayError::InvalidRequest(message.to_string()))
}

fn is_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn string_field(value: &serde_json::Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Runs scoring on the blocking pool; embedding inference is CPU-bound.
pub(crate) async fn run_evaluator<T, F>(state: &HandlerState, f: F) -> Result<T, GatewayError>
where
    T: Send + 'static,
    F: FnOnce(&SummaryEvaluator) -> Result<T, ScoringError> + Send + 'static,
{
    let evaluator = state.evaluator.clone();
    tokio::task::spawn_blocking(move || f(&evaluator))
        .await
        .map_err(|e| GatewayError::InternalError(format!("Evaluation task failed: {}", e)))?
        .map_err(GatewayError::from)
}

pub(crate) fn make_response<T: Serialize>(status: SummevalStatus, body: T) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SUMMEVAL_STATUS_HEADER,
        HeaderValue::from_static(status.as_header_value()),
    );
    (StatusCode::OK, headers, Json(body)).into_response()
}
