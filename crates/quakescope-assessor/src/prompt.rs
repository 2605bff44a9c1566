//! Prompt template loading and rendering via `minijinja`.
//!
//! The default templates are compiled into the binary. Operators can point
//! `PROMPT_TEMPLATES_DIR` at a directory containing `system.j2` and
//! `assessment.j2` to tune the wording without recompiling.

use minijinja::Environment;
use quakescope_types::Coordinate;
use serde::Serialize;

use crate::error::AssessError;
use crate::summary::HistoricalContext;

/// Sentence every generated assessment must open with.
///
/// The browser form strips this leading paragraph before display, so the
/// wording is part of the contract with the client.
pub const DISCLAIMER: &str = "Disclaimer: Earthquakes cannot be predicted with certainty.";

const SYSTEM_TEMPLATE: &str = include_str!("../templates/system.j2");
const ASSESSMENT_TEMPLATE: &str = include_str!("../templates/assessment.j2");

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to a generation backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System instruction framing the assistant's role.
    pub system: String,
    /// User message with the location, time, and historical context.
    pub user: String,
}

/// Values available to the templates.
#[derive(Debug, Serialize)]
struct PromptContext<'a> {
    latitude: f64,
    longitude: f64,
    date_time: &'a str,
    /// Preformatted so the prompt reads like the headline (`100`, not `100.0`).
    radius_km: String,
    nearby_count: usize,
    headline: &'a str,
    detail_lines: &'a [String],
    disclaimer: &'static str,
}

impl PromptEngine {
    /// Create a prompt engine from the built-in templates.
    pub fn embedded() -> Result<Self, AssessError> {
        let mut env = Environment::new();
        env.add_template("system", SYSTEM_TEMPLATE)
            .map_err(|e| AssessError::Template(format!("failed to add system template: {e}")))?;
        env.add_template("assessment", ASSESSMENT_TEMPLATE).map_err(|e| {
            AssessError::Template(format!("failed to add assessment template: {e}"))
        })?;
        Ok(Self { env })
    }

    /// Create a prompt engine loading templates from the given directory.
    ///
    /// The directory must contain `system.j2` and `assessment.j2`.
    pub fn from_dir(templates_dir: &str) -> Result<Self, AssessError> {
        let mut env = Environment::new();

        let system_tpl = load_template(templates_dir, "system.j2")?;
        let assessment_tpl = load_template(templates_dir, "assessment.j2")?;

        env.add_template_owned("system", system_tpl)
            .map_err(|e| AssessError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("assessment", assessment_tpl).map_err(|e| {
            AssessError::Template(format!("failed to add assessment template: {e}"))
        })?;

        Ok(Self { env })
    }

    /// Create a prompt engine from an optional override directory.
    pub fn new(templates_dir: Option<&str>) -> Result<Self, AssessError> {
        templates_dir.map_or_else(Self::embedded, Self::from_dir)
    }

    /// Render the prompt for one assessment request.
    pub fn render(
        &self,
        coordinate: Coordinate,
        date_time: &str,
        radius_km: f64,
        context: &HistoricalContext,
    ) -> Result<RenderedPrompt, AssessError> {
        let values = PromptContext {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            date_time,
            radius_km: format!("{radius_km}"),
            nearby_count: context.event_count(),
            headline: &context.headline,
            detail_lines: &context.detail_lines,
            disclaimer: DISCLAIMER,
        };

        let system = self.render_one("system", &values)?;
        let user = self.render_one("assessment", &values)?;

        Ok(RenderedPrompt { system, user })
    }

    fn render_one(&self, name: &str, values: &PromptContext<'_>) -> Result<String, AssessError> {
        self.env
            .get_template(name)
            .map_err(|e| AssessError::Template(format!("missing {name} template: {e}")))?
            .render(values)
            .map_err(|e| AssessError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, AssessError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| AssessError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn context() -> HistoricalContext {
        HistoricalContext {
            headline: "Found 1 historical earthquakes within 100 km of the location.".to_owned(),
            detail_lines: vec![
                "- M5.0 on 2024-01-01 00:00 UTC, 0.0 km away, depth 8.0 km".to_owned(),
            ],
        }
    }

    const LA: Coordinate = Coordinate {
        latitude: 34.05,
        longitude: -118.25,
    };

    #[test]
    fn embedded_templates_render() {
        let engine = PromptEngine::embedded().unwrap();
        let prompt = engine
            .render(LA, "2024-01-01T00:00:00Z", 100.0, &context())
            .unwrap();

        assert!(prompt.system.contains("never claim to predict"));
        assert!(prompt.user.contains(DISCLAIMER));
        assert!(prompt.user.contains("latitude 34.05, longitude -118.25"));
        assert!(prompt.user.contains("2024-01-01T00:00:00Z"));
        assert!(prompt.user.contains("Found 1 historical earthquakes"));
        assert!(prompt.user.contains("- M5.0 on 2024-01-01 00:00 UTC"));
        assert!(prompt.user.contains("earthquakes within 100 km, closest first"));
        assert!(!prompt.user.contains("100.0"));
    }

    #[test]
    fn fractional_radius_is_kept() {
        let engine = PromptEngine::embedded().unwrap();
        let prompt = engine.render(LA, "now", 42.5, &context()).unwrap();
        assert!(prompt.user.contains("earthquakes within 42.5 km, closest first"));
    }

    #[test]
    fn templates_load_from_directory() {
        let unique = format!(
            "quakescope_test_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("system.j2"), "Custom system for {{ nearby_count }} events").ok();
        std::fs::write(
            dir.join("assessment.j2"),
            "{{ disclaimer }}\n{{ headline }}\n{% for l in detail_lines %}{{ l }}\n{% endfor %}",
        )
        .ok();

        let engine = PromptEngine::new(dir.to_str()).unwrap();
        let prompt = engine.render(LA, "now", 100.0, &context()).unwrap();
        assert_eq!(prompt.system, "Custom system for 1 events");
        assert!(prompt.user.starts_with(DISCLAIMER));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_returns_error() {
        let unique = format!(
            "quakescope_missing_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("system.j2"), "test").unwrap();

        let result = PromptEngine::from_dir(dir.to_str().unwrap());
        assert!(matches!(result, Err(AssessError::Template(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
