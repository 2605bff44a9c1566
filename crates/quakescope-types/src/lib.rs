//! Shared type definitions for the Quakescope seismic risk service.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries and the HTTP boundary. Wire types flow downstream to
//! `TypeScript` via `ts-rs` for the browser form.
//!
//! # Modules
//!
//! - [`event`] -- Historical seismic event records held by the catalog
//! - [`coordinate`] -- Range-validated query coordinates
//! - [`api`] -- Request and response bodies for the prediction API

pub mod api;
pub mod coordinate;
pub mod event;

// Re-export all public types at crate root for convenience.
pub use api::{CoordinateInput, HealthResponse, PredictRequest, PredictResponse, RequestEcho};
pub use coordinate::Coordinate;
pub use event::SeismicEvent;
