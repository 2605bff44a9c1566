//! Error types for the `quakescope-catalog` crate.
//!
//! Only fatal load failures are errors. Individual malformed rows are
//! dropped and counted in a [`LoadReport`](crate::store::LoadReport).

use std::path::PathBuf;

/// Errors that abort a catalog load.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset {path}: {source}")]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The header row could not be read.
    #[error("failed to read dataset header: {0}")]
    Header(csv::Error),

    /// The underlying reader failed part way through the dataset.
    #[error("I/O error while reading dataset: {0}")]
    Read(csv::Error),
}
