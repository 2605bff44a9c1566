//! Shared application state for the prediction API server.
//!
//! [`AppState`] owns the loaded earthquake catalog, the proximity filter
//! settings, and the assessor. It is built once at startup, wrapped in
//! [`Arc`](std::sync::Arc), and injected via Axum's `State` extractor.
//! Nothing in it is mutated after construction, so handlers take no locks.

use std::path::PathBuf;

use quakescope_assessor::Assessor;
use quakescope_catalog::{EventStore, ProximityFilter};

/// Shared state for the Axum application.
pub struct AppState {
    /// The historical earthquake catalog (read-only).
    pub catalog: EventStore,
    /// Radius and result cap used for every query.
    pub filter: ProximityFilter,
    /// Prompt rendering and the generation backend.
    pub assessor: Assessor,
    /// Directory of static form assets, if served.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Create application state with the default proximity filter and no
    /// static assets.
    pub fn new(catalog: EventStore, assessor: Assessor) -> Self {
        Self {
            catalog,
            filter: ProximityFilter::default(),
            assessor,
            static_dir: None,
        }
    }

    /// Replace the proximity filter settings.
    #[must_use]
    pub fn with_filter(mut self, filter: ProximityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Serve static assets from `dir`.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Whether the catalog holds any events.
    pub fn is_ready(&self) -> bool {
        !self.catalog.is_empty()
    }
}
