//! Historical earthquake catalog and proximity filtering for Quakescope.
//!
//! The catalog is loaded once from a delimited text file and never changes
//! afterwards. Queries are answered by a full linear scan: every stored
//! event is scored by great-circle distance to the target, events outside
//! the search radius are dropped, and the closest few are returned.
//!
//! # Modules
//!
//! - [`error`] -- Error types for catalog loading.
//! - [`geo`] -- Haversine great-circle distance.
//! - [`proximity`] -- [`ProximityFilter`] radius + top-N selection over
//!   an [`EventStore`].
//! - [`store`] -- [`EventStore`], the validated immutable event collection.

pub mod error;
pub mod geo;
pub mod proximity;
pub mod store;

// Re-export primary types at crate root.
pub use error::CatalogError;
pub use geo::{EARTH_RADIUS_KM, haversine_km};
pub use proximity::{DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_KM, ProximityFilter, ScoredEvent};
pub use store::{EventStore, LoadReport};
