//! HTTP gateway (Axum) for summary evaluation.
//!
//! This module is primarily used by the `summeval` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod request;
pub mod state;


use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handler::{
    batch_evaluate_handler, catalog_evaluate_handler, compare_texts_handler,
    evaluate_summary_handler, get_video_handler, list_videos_handler, not_found_handler,
    similarity_score_handler,
};
pub use state::HandlerState;

use summeval::constants::{
    SERVICE_NAME, SUMMEVAL_STATUS_ERROR, SUMMEVAL_STATUS_HEADER, SUMMEVAL_STATUS_HEALTHY,
    SUMMEVAL_STATUS_READY,
};

const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/evaluate-summary", post(evaluate_summary_handler))
        .route("/compare-texts", post(compare_texts_handler))
        .route("/batch-evaluate", post(batch_evaluate_handler))
        .route("/similarity-score", post(similarity_score_handler))
        .route("/api/videos", get(list_videos_handler))
        .route("/api/videos/{id}", get(get_video_handler))
        .route("/api/evaluate", post(catalog_evaluate_handler))
        .fallback(not_found_handler)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(CORS_MAX_AGE)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub embedder: &'static str,
    pub embedder_mode: &'static str,
    pub catalog: &'static str,
    pub catalog_videos: usize,
    pub default_method: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SUMMEVAL_STATUS_HEADER,
        HeaderValue::from_static(SUMMEVAL_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse {
            status: SUMMEVAL_STATUS_HEALTHY,
            service: SERVICE_NAME,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let is_stub = state.evaluator.is_embedder_stub();
    let embedder_mode = if is_stub { "stub" } else { "real" };

    let catalog_status = if state.catalog.is_empty() {
        SUMMEVAL_STATUS_ERROR
    } else {
        SUMMEVAL_STATUS_READY
    };

    let components = ComponentStatus {
        http: SUMMEVAL_STATUS_READY,
        embedder: SUMMEVAL_STATUS_READY,
        embedder_mode,
        catalog: catalog_status,
        catalog_videos: state.catalog.len(),
        default_method: state.evaluator.default_method().as_str(),
    };

    let is_ready = components.catalog == SUMMEVAL_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready {
        SUMMEVAL_STATUS_READY
    } else {
        "pending"
    };

    let mut headers = HeaderMap::new();
    headers.insert(SUMMEVAL_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
