//! The historical event store.
//!
//! [`EventStore`] owns the validated, immutable collection of
//! [`SeismicEvent`]s. It is built once at startup from a CSV dataset with
//! a header row and is then shared read-only for the life of the process.
//!
//! # Load rules
//!
//! - Columns are matched by header name, case-insensitively. Unknown
//!   columns are ignored, and a canonical name wins over its alias.
//! - A row is kept only if `latitude`, `longitude`, `magnitude` and `time`
//!   all parse. Coordinates outside the valid ranges count as unparseable.
//! - `time` is epoch milliseconds, or an RFC 3339 / ISO-8601 timestamp.
//! - A fatal failure (unreadable file or header, I/O error mid-stream)
//!   yields an empty store, never a partial one.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use quakescope_types::{Coordinate, SeismicEvent};
use tracing::{error, info, warn};

use crate::error::CatalogError;

/// Naive timestamp layouts accepted in the `time` column, read as UTC.
const NAIVE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Row counts from a catalog load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows that became events.
    pub accepted: usize,
    /// Rows dropped because a required field was missing or malformed.
    pub rejected: usize,
}

/// Accepted header names per field, canonical name first.
const TIME: &[&str] = &["time", "timestamp"];
const LATITUDE: &[&str] = &["latitude"];
const LONGITUDE: &[&str] = &["longitude"];
const MAGNITUDE: &[&str] = &["magnitude", "mag", "magnitudo"];
const DEPTH: &[&str] = &["depth"];
const PLACE: &[&str] = &["place"];
const SIGNIFICANCE: &[&str] = &["significance", "sig"];
const STATION_COUNT: &[&str] = &["station_count", "nst"];
const GAP: &[&str] = &["gap"];
const MIN_DISTANCE: &[&str] = &["min_distance", "dmin"];
const RMS: &[&str] = &["rms"];
const TSUNAMI: &[&str] = &["tsunami"];
const STATUS: &[&str] = &["status"];
const DATA_TYPE: &[&str] = &["data_type", "type"];

/// Column positions resolved once from the header row.
///
/// When a file carries both a canonical name and one of its aliases, the
/// canonical column wins and the alias is ignored like any unknown column.
#[derive(Debug, Default)]
struct Columns {
    time: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    magnitude: Option<usize>,
    depth: Option<usize>,
    place: Option<usize>,
    significance: Option<usize>,
    station_count: Option<usize>,
    gap: Option<usize>,
    min_distance: Option<usize>,
    rms: Option<usize>,
    tsunami: Option<usize>,
    status: Option<usize>,
    data_type: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let find = |names: &[&str]| {
            names.iter().find_map(|name| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
            })
        };
        Self {
            time: find(TIME),
            latitude: find(LATITUDE),
            longitude: find(LONGITUDE),
            magnitude: find(MAGNITUDE),
            depth: find(DEPTH),
            place: find(PLACE),
            significance: find(SIGNIFICANCE),
            station_count: find(STATION_COUNT),
            gap: find(GAP),
            min_distance: find(MIN_DISTANCE),
            rms: find(RMS),
            tsunami: find(TSUNAMI),
            status: find(STATUS),
            data_type: find(DATA_TYPE),
        }
    }

    /// Convert a row to an event, or `None` if any required field is unusable.
    fn event(&self, record: &csv::StringRecord) -> Option<SeismicEvent> {
        let field = |column: Option<usize>| column.and_then(|i| record.get(i));
        let number = |column: Option<usize>| parse_number(field(column));
        let text = |column: Option<usize>| {
            field(column)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
        };

        let timestamp = parse_time(field(self.time)?)?;
        let latitude = number(self.latitude)?;
        let longitude = number(self.longitude)?;
        let magnitude = number(self.magnitude)?;
        Coordinate::new(latitude, longitude).ok()?;

        Some(SeismicEvent {
            timestamp,
            latitude,
            longitude,
            magnitude,
            depth: number(self.depth),
            place: text(self.place),
            significance: number(self.significance),
            station_count: number(self.station_count),
            gap: number(self.gap),
            min_distance: number(self.min_distance),
            rms: number(self.rms),
            tsunami: number(self.tsunami),
            status: text(self.status),
            data_type: text(self.data_type),
        })
    }
}

/// Immutable, validated collection of historical events.
///
/// Events are ordered most recent first.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<SeismicEvent>,
}

impl EventStore {
    /// A store with no events.
    pub const fn empty() -> Self {
        Self { events: Vec::new() }
    }

    /// Build a store from already-typed events.
    ///
    /// Events whose coordinates or magnitude are not finite, or whose
    /// coordinates are out of range, are dropped to keep the store's
    /// invariants. The rest are ordered by timestamp, most recent first.
    pub fn from_events(events: impl IntoIterator<Item = SeismicEvent>) -> Self {
        let mut events: Vec<SeismicEvent> = events
            .into_iter()
            .filter(|e| {
                e.magnitude.is_finite() && Coordinate::new(e.latitude, e.longitude).is_ok()
            })
            .collect();
        // Stable: equal timestamps keep source order.
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { events }
    }

    /// Parse a CSV dataset, reporting fatal errors to the caller.
    ///
    /// Malformed rows are skipped and counted in the returned
    /// [`LoadReport`]; only failures that make the whole source unreadable
    /// are returned as errors.
    pub fn try_load<R: Read>(reader: R) -> Result<(Self, LoadReport), CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::resolve(rdr.headers().map_err(CatalogError::Header)?);

        let mut events = Vec::new();
        let mut report = LoadReport::default();

        for row in rdr.records() {
            let record = match row {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(CatalogError::Read(e)),
                Err(_) => {
                    report.rejected = report.rejected.saturating_add(1);
                    continue;
                }
            };
            if let Some(event) = columns.event(&record) {
                events.push(event);
                report.accepted = report.accepted.saturating_add(1);
            } else {
                report.rejected = report.rejected.saturating_add(1);
            }
        }

        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok((Self { events }, report))
    }

    /// Parse a CSV dataset, degrading to an empty store on fatal errors.
    pub fn load<R: Read>(reader: R) -> Self {
        match Self::try_load(reader) {
            Ok((store, report)) => {
                log_report(&report);
                store
            }
            Err(e) => {
                error!(error = %e, "catalog load failed, continuing with an empty store");
                Self::empty()
            }
        }
    }

    /// Open and parse a CSV dataset from disk.
    ///
    /// Like [`EventStore::load`], any fatal failure (including a missing
    /// file) produces an empty store.
    pub fn load_path(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => {
                info!(path = %path.display(), "loading earthquake catalog");
                Self::load(file)
            }
            Err(source) => {
                let e = CatalogError::Open {
                    path: path.to_path_buf(),
                    source,
                };
                error!(error = %e, "catalog load failed, continuing with an empty store");
                Self::empty()
            }
        }
    }

    /// Every event, most recent first.
    pub fn all(&self) -> &[SeismicEvent] {
        &self.events
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn log_report(report: &LoadReport) {
    if report.rejected > 0 {
        warn!(
            accepted = report.accepted,
            rejected = report.rejected,
            "dropped malformed catalog rows"
        );
    }
    info!(events = report.accepted, "earthquake catalog loaded");
}

/// Parse a finite decimal number from an optional, possibly blank field.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the `time` column: epoch milliseconds first, then text formats.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
