//! Startup sequence: load the catalog, build the assessor, assemble state.
//!
//! [`prepare_state`] finishes loading the catalog before it returns, and
//! the binary only binds the listener afterwards. No request can observe a
//! partially loaded catalog.

use std::path::PathBuf;
use std::sync::Arc;

use quakescope_assessor::{AssessError, Assessor};
use quakescope_catalog::{EventStore, ProximityFilter};
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::state::AppState;

/// Errors that can occur while preparing the service.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The generation backend or prompt templates could not be set up.
    #[error("assessor setup failed: {0}")]
    Assessor(#[from] AssessError),

    /// The blocking catalog load task panicked or was cancelled.
    #[error("catalog load task failed: {0}")]
    CatalogTask(#[from] tokio::task::JoinError),
}

/// Load the catalog from `path` on the blocking thread pool.
///
/// Load failures degrade to an empty catalog; they are logged, not
/// returned.
pub async fn load_catalog(path: PathBuf) -> Result<EventStore, StartupError> {
    let store = tokio::task::spawn_blocking(move || EventStore::load_path(&path)).await?;
    if store.is_empty() {
        warn!("earthquake catalog is empty, /predict will answer 503");
    }
    Ok(store)
}

/// Build the shared application state from configuration.
pub async fn prepare_state(config: &ServiceConfig) -> Result<Arc<AppState>, StartupError> {
    let assessor = Assessor::from_config(&config.generation)?;
    let catalog = load_catalog(config.dataset_path.clone()).await?;

    let filter = ProximityFilter::new()
        .with_radius_km(config.search_radius_km)
        .with_max_results(config.max_nearby_events);
    info!(
        events = catalog.len(),
        radius_km = filter.radius_km(),
        max_results = filter.max_results(),
        "catalog ready"
    );

    let mut state = AppState::new(catalog, assessor).with_filter(filter);
    if let Some(dir) = &config.static_dir {
        if dir.is_dir() {
            info!(dir = %dir.display(), "serving static assets");
            state = state.with_static_dir(dir.clone());
        } else {
            warn!(dir = %dir.display(), "static asset directory not found, form disabled");
        }
    }

    Ok(Arc::new(state))
}
