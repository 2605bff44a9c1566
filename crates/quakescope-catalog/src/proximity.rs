//! Radius-bounded nearest-event selection.
//!
//! [`ProximityFilter::nearby`] scores every stored event by Haversine
//! distance to a target coordinate, keeps those within the radius, and
//! returns the closest `max_results` in ascending distance order.
//!
//! There is no spatial index; each query is a full linear scan, which is
//! fine for catalogs in the tens of thousands of rows.

use quakescope_types::{Coordinate, SeismicEvent};

use crate::geo::{epicentre, haversine_km};
use crate::store::EventStore;

/// Default search radius, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 100.0;

/// Default maximum number of events returned per query.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A stored event paired with its distance from a query coordinate.
///
/// Borrows from the [`EventStore`] and lives only for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredEvent<'a> {
    /// The matched event.
    pub event: &'a SeismicEvent,
    /// Great-circle distance from the query coordinate, in kilometres.
    pub distance_km: f64,
}

/// Search parameters for nearby-event queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityFilter {
    radius_km: f64,
    max_results: usize,
}

impl Default for ProximityFilter {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ProximityFilter {
    /// A filter with the default radius and result cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search radius in kilometres.
    #[must_use]
    pub const fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set the maximum number of events returned.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// The search radius in kilometres.
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// The maximum number of events returned.
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Nearby events from `store`, closest first.
    ///
    /// The target is assumed to be range-validated. An empty store yields
    /// an empty result.
    pub fn nearby<'a>(&self, store: &'a EventStore, target: Coordinate) -> Vec<ScoredEvent<'a>> {
        self.nearby_in(store.all(), target)
    }

    /// Nearby events from an arbitrary slice, closest first.
    ///
    /// Events at equal distance keep their order in `events`.
    pub fn nearby_in<'a>(
        &self,
        events: &'a [SeismicEvent],
        target: Coordinate,
    ) -> Vec<ScoredEvent<'a>> {
        let mut scored: Vec<ScoredEvent<'a>> = events
            .iter()
            .map(|event| ScoredEvent {
                event,
                distance_km: haversine_km(target, epicentre(event)),
            })
            .filter(|s| s.distance_km <= self.radius_km)
            .collect();

        // `sort_by` is stable, which gives the store-order tie-break.
        scored.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        scored.truncate(self.max_results);
        scored
    }
}
