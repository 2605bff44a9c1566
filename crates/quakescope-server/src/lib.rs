//! Prediction API server for the Quakescope seismic risk service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`POST /predict`** -- nearby historical earthquakes for a coordinate
//!   plus a generated natural-language risk assessment
//! - **`GET /health`** -- catalog size and backend status
//! - **Static assets** -- the browser form, served from a directory
//!
//! # Architecture
//!
//! The earthquake catalog is loaded once, before the listener is bound,
//! and is then shared read-only through [`AppState`]. Each prediction runs
//! the proximity filter over the catalog and makes exactly one call to the
//! generation backend; a failed call fails the request.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ConfigError, LogFormat, ServiceConfig};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, load_catalog, prepare_state};
pub use state::AppState;
