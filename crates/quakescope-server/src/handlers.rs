//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/predict` | Nearby events + generated risk assessment |
//! | `GET` | `/health` | Catalog size and backend name |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use quakescope_types::{Coordinate, HealthResponse, PredictRequest, PredictResponse, RequestEcho};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /predict -- nearby events + generated assessment
// ---------------------------------------------------------------------------

/// Answer a location/time query.
///
/// Checks, in order: the catalog is non-empty (503), the body decodes and
/// validates (400). Then runs the proximity filter and asks the generation
/// backend for an assessment (500 on failure).
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = Uuid::now_v7();
    let span = info_span!("predict", %request_id);

    async move {
        if !state.is_ready() {
            warn!("rejecting request, earthquake catalog is empty");
            return Err(ApiError::NotReady(
                "Earthquake data is not available. Please try again later.".to_owned(),
            ));
        }

        let Json(request) = payload.map_err(|e| {
            ApiError::InvalidRequest(format!("invalid JSON body: {}", e.body_text()))
        })?;
        let (coordinate, date_time) = validate(&request)?;

        let nearby = state.filter.nearby(&state.catalog, coordinate);
        info!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            nearby = nearby.len(),
            "nearby events selected"
        );

        let assessment = state
            .assessor
            .assess(coordinate, &date_time, &nearby, state.filter.radius_km())
            .await
            .inspect_err(|e| warn!(error = %e, "assessment generation failed"))?;

        let nearby_events_count = u32::try_from(nearby.len()).unwrap_or(u32::MAX);

        Ok(Json(PredictResponse {
            request: RequestEcho {
                date_time,
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            },
            historical_context_summary: assessment.context.headline,
            nearby_events_count,
            gemini_assessment: assessment.text,
        }))
    }
    .instrument(span)
    .await
}

// ---------------------------------------------------------------------------
// GET /health -- liveness + catalog status
// ---------------------------------------------------------------------------

/// Report whether the catalog is loaded and which backend is configured.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = if state.is_ready() { "ok" } else { "degraded" };
    Json(HealthResponse {
        status: status.to_owned(),
        events_loaded: u32::try_from(state.catalog.len()).unwrap_or(u32::MAX),
        backend: state.assessor.backend_name().to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check required fields and coordinate ranges.
///
/// Returns the validated coordinate and the requested time string.
fn validate(request: &PredictRequest) -> Result<(Coordinate, String), ApiError> {
    let latitude = request
        .latitude
        .as_ref()
        .ok_or_else(|| ApiError::InvalidRequest("latitude is required".to_owned()))?
        .to_f64()
        .ok_or_else(|| ApiError::InvalidRequest("latitude must be a number".to_owned()))?;

    let longitude = request
        .longitude
        .as_ref()
        .ok_or_else(|| ApiError::InvalidRequest("longitude is required".to_owned()))?
        .to_f64()
        .ok_or_else(|| ApiError::InvalidRequest("longitude must be a number".to_owned()))?;

    let coordinate = Coordinate::new(latitude, longitude)
        .map_err(|e| ApiError::InvalidRequest(describe(&e)))?;

    let date_time = request
        .date_time
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("dateTime is required".to_owned()))?;

    Ok((coordinate, date_time.to_owned()))
}

/// Flatten validator output into one readable sentence.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
