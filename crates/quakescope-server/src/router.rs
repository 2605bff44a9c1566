//! Axum router construction for the prediction API.
//!
//! Assembles the API routes and the static form assets into a single
//! [`Router`] with CORS and request tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /predict` -- nearby events + generated assessment
/// - `GET /health` -- catalog and backend status
/// - everything else -- files from [`AppState::static_dir`], when set
///
/// CORS allows any origin so the form can also be hosted elsewhere.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health));

    if let Some(dir) = &state.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
