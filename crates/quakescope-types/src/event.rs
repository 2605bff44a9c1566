//! Historical seismic event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single historical earthquake from the static catalog.
///
/// Events are immutable once loaded. The catalog guarantees that
/// `timestamp`, `latitude`, `longitude` and `magnitude` were all present
/// and parseable in the source row; everything else is optional metadata
/// that is preserved for display but never used for filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeismicEvent {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Latitude in decimal degrees, within `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in decimal degrees, within `[-180, 180]`.
    pub longitude: f64,
    /// Magnitude on whatever scale the source reports.
    pub magnitude: f64,
    /// Hypocentre depth in kilometres, if known.
    pub depth: Option<f64>,
    /// Free-text location description (e.g. `"10 km SSW of Idyllwild, CA"`).
    pub place: Option<String>,
    /// Significance score assigned by the source network.
    pub significance: Option<f64>,
    /// Number of seismic stations used to locate the event.
    pub station_count: Option<f64>,
    /// Largest azimuthal gap between stations, in degrees.
    pub gap: Option<f64>,
    /// Horizontal distance to the nearest station, in degrees.
    pub min_distance: Option<f64>,
    /// Root-mean-square travel time residual, in seconds.
    pub rms: Option<f64>,
    /// Tsunami flag as reported by the source (usually `0` or `1`).
    pub tsunami: Option<f64>,
    /// Review status (`automatic`, `reviewed`, ...).
    pub status: Option<String>,
    /// Source event type (`earthquake`, `quarry blast`, ...).
    pub data_type: Option<String>,
}

impl SeismicEvent {
    /// Create an event with only the required fields populated.
    pub const fn new(
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        magnitude: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            magnitude,
            depth: None,
            place: None,
            significance: None,
            station_count: None,
            gap: None,
            min_distance: None,
            rms: None,
            tsunami: None,
            status: None,
            data_type: None,
        }
    }

    /// Set the hypocentre depth in kilometres.
    #[must_use]
    pub fn with_depth(mut self, depth_km: f64) -> Self {
        self.depth = Some(depth_km);
        self
    }

    /// Set the free-text place description.
    #[must_use]
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_optional_metadata_as_null() {
        let t = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let event = SeismicEvent::new(t, 34.05, -118.25, 5.0).with_depth(12.5);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["depth"], 12.5);
        assert!(json["place"].is_null());
        assert_eq!(json["magnitude"], 5.0);
    }
}
