//! Error types for the prediction API.
//!
//! [`ApiError`] unifies all request failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{ "error": <message>, "status": <code> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quakescope_assessor::AssessError;

/// Message returned when the generation service refuses on safety grounds.
pub const SAFETY_BLOCKED_MESSAGE: &str =
    "The assessment was blocked by the generation service's content safety filters.";

/// Message returned for any other generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate a risk assessment.";

/// Errors that can occur while handling an API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is missing fields or has out-of-range values.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The earthquake catalog is empty, so no query can be answered.
    #[error("service not ready: {0}")]
    NotReady(String),

    /// The generation backend failed.
    #[error("assessment failed: {0}")]
    Generation(#[from] AssessError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotReady(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            Self::Generation(e) if e.is_safety_block() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SAFETY_BLOCKED_MESSAGE.to_owned(),
            ),
            Self::Generation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERATION_FAILED_MESSAGE.to_owned(),
            ),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
