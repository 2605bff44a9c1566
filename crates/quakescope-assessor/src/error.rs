//! Error types for risk assessment generation.
//!
//! Uses `thiserror` for typed errors that surface through the whole
//! pipeline, from configuration to the generation call.

/// Errors that can occur while producing a risk assessment.
#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to load or render a prompt template.
    #[error("template render error: {0}")]
    Template(String),

    /// The generation backend returned an error or was unreachable.
    #[error("generation backend error: {0}")]
    Backend(String),

    /// The generation backend refused the prompt or its output on
    /// content-safety grounds.
    #[error("blocked by content safety filter: {0}")]
    SafetyBlocked(String),
}

impl AssessError {
    /// Whether the failure is a content-safety rejection.
    pub const fn is_safety_block(&self) -> bool {
        matches!(self, Self::SafetyBlocked(_))
    }
}
