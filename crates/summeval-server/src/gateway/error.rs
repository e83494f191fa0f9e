use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use summeval::constants::SUMMEVAL_STATUS_HEADER;
use summeval::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("scoring failed: {0}")]
    ScoringFailed(ScoringError),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ScoringError> for GatewayError {
    fn from(err: ScoringError) -> Self {
        if err.is_client_error() {
            GatewayError::InvalidRequest(err.to_string())
        } else {
            GatewayError::ScoringFailed(err)
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Client-facing errors carry the bare message; server errors keep their prefix.
        let (status, error_message, summeval_status) = match self {
            GatewayError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, "invalid_request"),
            GatewayError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "not_found"),
            err @ GatewayError::ScoringFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "scoring_error",
            ),
            err @ GatewayError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "internal_error",
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %error_message, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            SUMMEVAL_STATUS_HEADER,
            HeaderValue::from_static(summeval_status),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
