//! Request and response bodies for the prediction API.
//!
//! Field names follow the browser form's JSON (`dateTime`, `latitude`,
//! `longitude`) and the response envelope it renders.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A coordinate value as submitted by a client.
///
/// HTML forms post numbers as strings, so both encodings are accepted
/// and resolved with [`CoordinateInput::to_f64`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum CoordinateInput {
    /// A JSON number.
    Number(f64),
    /// A JSON string expected to contain a decimal number.
    Text(String),
}

impl CoordinateInput {
    /// Interpret the input as a finite decimal number.
    ///
    /// Returns `None` for unparseable text and non-finite values.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Body of `POST /predict`.
///
/// Every field is optional at the decoding layer so that missing values
/// surface as validation errors with a readable message instead of a
/// generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PredictRequest {
    /// Requested point in time (ISO-8601).
    #[serde(rename = "dateTime", default)]
    pub date_time: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub latitude: Option<CoordinateInput>,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub longitude: Option<CoordinateInput>,
}

/// The validated request echoed back in a [`PredictResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RequestEcho {
    /// Requested point in time, as submitted.
    #[serde(rename = "dateTime")]
    pub date_time: String,
    /// Parsed latitude.
    pub latitude: f64,
    /// Parsed longitude.
    pub longitude: f64,
}

/// Successful response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PredictResponse {
    /// The validated request.
    pub request: RequestEcho,
    /// One-line summary of the nearby historical events.
    pub historical_context_summary: String,
    /// Number of nearby events that informed the assessment.
    pub nearby_events_count: u32,
    /// Generated natural-language risk assessment.
    pub gemini_assessment: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthResponse {
    /// `ok` when the catalog holds events, `degraded` otherwise.
    pub status: String,
    /// Number of events in the loaded catalog.
    pub events_loaded: u32,
    /// Name of the configured generation backend.
    pub backend: String,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_input_accepts_numbers_and_strings() {
        let req: PredictRequest = serde_json::from_str(
            r#"{"dateTime":"2024-01-01T00:00:00Z","latitude":34.05,"longitude":"-118.25"}"#,
        )
        .unwrap();
        assert_eq!(req.date_time.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(req.latitude.and_then(|l| l.to_f64()), Some(34.05));
        assert_eq!(req.longitude.and_then(|l| l.to_f64()), Some(-118.25));
    }

    #[test]
    fn coordinate_input_rejects_garbage_and_nan() {
        assert_eq!(CoordinateInput::Text("north".to_owned()).to_f64(), None);
        assert_eq!(CoordinateInput::Text("NaN".to_owned()).to_f64(), None);
        assert_eq!(CoordinateInput::Text(" 12.5 ".to_owned()).to_f64(), Some(12.5));
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let req: PredictRequest = serde_json::from_str("{}").unwrap();
        assert!(req.date_time.is_none());
        assert!(req.latitude.is_none());
    }

    #[test]
    fn response_uses_form_field_names() {
        let response = PredictResponse {
            request: RequestEcho {
                date_time: "2024-01-01T00:00:00Z".to_owned(),
                latitude: 1.0,
                longitude: 2.0,
            },
            historical_context_summary: "Found 0 historical earthquakes".to_owned(),
            nearby_events_count: 0,
            gemini_assessment: "text".to_owned(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["request"]["dateTime"], "2024-01-01T00:00:00Z");
        assert_eq!(json["nearby_events_count"], 0);
        assert_eq!(json["gemini_assessment"], "text");
    }
}
