//! Service configuration loaded from the environment.
//!
//! The generation backend settings are delegated to
//! [`GenerationConfig`]; everything about where to listen, which dataset
//! to load, and how wide to search lives here.

use std::path::PathBuf;

use quakescope_assessor::{AssessError, GenerationConfig};
use quakescope_catalog::{DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_KM};

use crate::server::ServerConfig;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/earthquakes.csv";

/// Default static asset directory, relative to the working directory.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but cannot be parsed.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The generation backend configuration is incomplete or invalid.
    #[error(transparent)]
    Generation(#[from] AssessError),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listener address.
    pub server: ServerConfig,
    /// Path of the earthquake catalog CSV.
    pub dataset_path: PathBuf,
    /// Directory of static assets for the browser form. `None` disables
    /// static serving.
    pub static_dir: Option<PathBuf>,
    /// Proximity filter radius, in kilometres.
    pub search_radius_km: f64,
    /// Maximum number of nearby events used per request.
    pub max_nearby_events: usize,
    /// Log output format.
    pub log_format: LogFormat,
    /// Generation backend settings.
    pub generation: GenerationConfig,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `GEMINI_API_KEY` -- key for the generation service
    ///
    /// Optional variables:
    /// - `HOST` -- bind address (default `0.0.0.0`)
    /// - `PORT` -- listening port (default 3000)
    /// - `DATASET_PATH` -- catalog CSV (default `data/earthquakes.csv`)
    /// - `STATIC_DIR` -- form assets (default `public`; `none` disables)
    /// - `SEARCH_RADIUS_KM` -- proximity radius (default 100)
    /// - `MAX_NEARBY_EVENTS` -- result cap (default 10)
    /// - `LOG_FORMAT` -- `pretty` (default) or `json`
    ///
    /// See [`GenerationConfig::from_env`] for the backend variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let generation = GenerationConfig::from_lookup(&lookup)?;

        let defaults = ServerConfig::default();
        let host = var("HOST").unwrap_or(defaults.host);
        let port: u16 = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;

        let dataset_path =
            PathBuf::from(var("DATASET_PATH").unwrap_or_else(|| DEFAULT_DATASET_PATH.to_owned()));

        let static_dir = match var("STATIC_DIR") {
            Some(dir) if dir.eq_ignore_ascii_case("none") => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => Some(PathBuf::from(DEFAULT_STATIC_DIR)),
        };

        let search_radius_km: f64 =
            parse_or("SEARCH_RADIUS_KM", var("SEARCH_RADIUS_KM"), DEFAULT_RADIUS_KM)?;
        if !search_radius_km.is_finite() || search_radius_km < 0.0 {
            return Err(ConfigError::Invalid {
                name: "SEARCH_RADIUS_KM",
                reason: format!("{search_radius_km} is not a non-negative distance"),
            });
        }

        let max_nearby_events: usize =
            parse_or("MAX_NEARBY_EVENTS", var("MAX_NEARBY_EVENTS"), DEFAULT_MAX_RESULTS)?;

        let log_format = match var("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("pretty" | "text") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    reason: format!("unknown format {other}"),
                });
            }
        };

        Ok(Self {
            server: ServerConfig { host, port },
            dataset_path,
            static_dir,
            search_radius_km,
            max_nearby_events,
            log_format,
            generation,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.trim().parse().map_err(|e| ConfigError::Invalid {
            name,
            reason: format!("{value}: {e}"),
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn refuses_to_start_without_api_key() {
        let result = ServiceConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert!(matches!(result, Err(ConfigError::Generation(_))));
    }

    #[test]
    fn defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")]))
            .unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
        assert_eq!(config.static_dir, Some(PathBuf::from(DEFAULT_STATIC_DIR)));
        assert_eq!(config.max_nearby_events, DEFAULT_MAX_RESULTS);
        assert!((config.search_radius_km - DEFAULT_RADIUS_KM).abs() < f64::EPSILON);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("PORT", "8081"),
            ("HOST", "127.0.0.1"),
            ("DATASET_PATH", "/srv/quakes.csv"),
            ("STATIC_DIR", "none"),
            ("SEARCH_RADIUS_KM", "250.5"),
            ("MAX_NEARBY_EVENTS", "25"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.dataset_path, PathBuf::from("/srv/quakes.csv"));
        assert_eq!(config.static_dir, None);
        assert_eq!(config.max_nearby_events, 25);
        assert!((config.search_radius_km - 250.5).abs() < f64::EPSILON);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        for (name, value) in [
            ("PORT", "eighty"),
            ("PORT", "70000"),
            ("SEARCH_RADIUS_KM", "-5"),
            ("MAX_NEARBY_EVENTS", "many"),
            ("LOG_FORMAT", "xml"),
        ] {
            let result =
                ServiceConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), (name, value)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "{name}={value} should be rejected"
            );
        }
    }
}
