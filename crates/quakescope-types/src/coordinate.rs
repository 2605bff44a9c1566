//! Range-validated geographic coordinates.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationErrors};

/// A latitude/longitude pair in decimal degrees.
///
/// Construct through [`Coordinate::new`] to get range checking; the
/// proximity filter assumes its target has already been validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationErrors> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        if !latitude.is_finite() {
            return Err(non_finite("latitude"));
        }
        if !longitude.is_finite() {
            return Err(non_finite("longitude"));
        }
        Ok(coordinate)
    }
}

/// Range checks pass NaN through, so finiteness is reported separately.
fn non_finite(field: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut error = validator::ValidationError::new("finite");
    error.message = Some(format!("{field} must be a finite number").into());
    errors.add(field, error);
    errors
}
