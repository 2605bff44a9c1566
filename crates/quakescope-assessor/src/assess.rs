//! End-to-end assessment: summarise nearby events, render the prompt,
//! call the generation backend.

use quakescope_catalog::ScoredEvent;
use quakescope_types::Coordinate;
use tracing::{debug, info, warn};

use crate::config::GenerationConfig;
use crate::error::AssessError;
use crate::llm::{GenerationBackend, create_backend};
use crate::prompt::PromptEngine;
use crate::summary::{HistoricalContext, historical_context};

/// Returned in place of the generated text when the backend produces none.
pub const FALLBACK_ASSESSMENT: &str = "Could not generate an assessment at this time.";

/// A finished assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Summary of the historical events the prompt was built from.
    pub context: HistoricalContext,
    /// Generated narrative, or [`FALLBACK_ASSESSMENT`].
    pub text: String,
}

/// Couples a prompt engine with a generation backend.
pub struct Assessor {
    prompts: PromptEngine,
    backend: GenerationBackend,
}

impl Assessor {
    /// Create an assessor from its parts.
    pub const fn new(prompts: PromptEngine, backend: GenerationBackend) -> Self {
        Self { prompts, backend }
    }

    /// Build the prompt engine and backend described by `config`.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, AssessError> {
        let prompts = PromptEngine::new(config.templates_dir.as_deref())?;
        let backend = create_backend(config);
        info!(
            backend = backend.name(),
            model = %config.model,
            templates = config.templates_dir.as_deref().unwrap_or("embedded"),
            "generation backend configured"
        );
        Ok(Self::new(prompts, backend))
    }

    /// Name of the configured backend.
    pub const fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Produce a risk assessment for `coordinate` at `date_time`.
    ///
    /// `nearby` is the proximity filter's output for the same coordinate
    /// and `radius_km` the radius it was run with. One generation call is
    /// made; any failure aborts the assessment.
    pub async fn assess(
        &self,
        coordinate: Coordinate,
        date_time: &str,
        nearby: &[ScoredEvent<'_>],
        radius_km: f64,
    ) -> Result<Assessment, AssessError> {
        let context = historical_context(nearby, radius_km);
        debug!(context = %context.to_text(), "historical context built");
        let prompt = self
            .prompts
            .render(coordinate, date_time, radius_km, &context)?;
        debug!(
            system_len = prompt.system.len(),
            user_len = prompt.user.len(),
            "prompt rendered"
        );

        let generated = self.backend.generate(&prompt).await?;
        let text = if generated.trim().is_empty() {
            warn!(backend = self.backend.name(), "backend returned no text, using fallback");
            FALLBACK_ASSESSMENT.to_owned()
        } else {
            generated
        };

        Ok(Assessment { context, text })
    }
}
