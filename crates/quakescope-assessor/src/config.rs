//! Configuration types for the generation backend.
//!
//! All configuration is loaded from environment variables. The assessor
//! needs to know which backend to call, where it lives, the credentials,
//! and which model to ask.

use crate::error::AssessError;

/// Default Gemini REST base URL.
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default `OpenAI`-compatible base URL.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Default `OpenAI`-compatible model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Configuration for the generation backend and prompt templates.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// The backend type (gemini, openai).
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier (e.g. `gemini-1.5-flash`).
    pub model: String,
    /// Directory holding prompt template overrides. `None` uses the
    /// templates compiled into the binary.
    pub templates_dir: Option<String>,
}

/// Supported generation backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// `OpenAI`-compatible chat completions API.
    OpenAi,
}

impl BackendType {
    /// Parse a backend name as written in configuration.
    pub fn parse(name: &str) -> Result<Self, AssessError> {
        match name.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            other => Err(AssessError::Config(format!(
                "unknown generation backend: {other}"
            ))),
        }
    }

    const fn default_api_url(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_API_URL,
            Self::OpenAi => DEFAULT_OPENAI_API_URL,
        }
    }

    const fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }
}

impl GenerationConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `GEMINI_API_KEY` -- API key for the generation service
    ///   (`GENERATION_API_KEY` takes precedence when set)
    ///
    /// Optional variables:
    /// - `GENERATION_BACKEND` -- `gemini` (default) or `openai`
    /// - `GENERATION_API_URL` -- base URL (default depends on backend)
    /// - `GENERATION_MODEL` -- model name (default depends on backend)
    /// - `PROMPT_TEMPLATES_DIR` -- directory of prompt template overrides
    pub fn from_env() -> Result<Self, AssessError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AssessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend_type = var("GENERATION_BACKEND")
            .map_or(Ok(BackendType::Gemini), |name| BackendType::parse(&name))?;

        let api_key = var("GENERATION_API_KEY")
            .or_else(|| var("GEMINI_API_KEY"))
            .ok_or_else(|| {
                AssessError::Config("missing required env var GEMINI_API_KEY".to_owned())
            })?;

        let api_url = var("GENERATION_API_URL")
            .unwrap_or_else(|| backend_type.default_api_url().to_owned());
        let model =
            var("GENERATION_MODEL").unwrap_or_else(|| backend_type.default_model().to_owned());

        Ok(Self {
            backend_type,
            api_url,
            api_key,
            model,
            templates_dir: var("PROMPT_TEMPLATES_DIR"),
        })
    }
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
    fn api_key_is_required() {
        let result = GenerationConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(AssessError::Config(_))));

        let result = GenerationConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn gemini_defaults() {
        let config = GenerationConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")]))
            .unwrap();
        assert_eq!(config.backend_type, BackendType::Gemini);
        assert_eq!(config.api_url, DEFAULT_GEMINI_API_URL);
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.api_key, "k");
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn openai_backend_with_overrides() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("GENERATION_BACKEND", "OpenAI"),
            ("GENERATION_API_KEY", "primary"),
            ("GEMINI_API_KEY", "ignored"),
            ("GENERATION_MODEL", "local-model"),
            ("GENERATION_API_URL", "http://localhost:11434/v1"),
        ]))
        .unwrap();
        assert_eq!(config.backend_type, BackendType::OpenAi);
        assert_eq!(config.api_key, "primary");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.api_url, "http://localhost:11434/v1");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result = GenerationConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GENERATION_BACKEND", "carrier-pigeon"),
        ]));
        assert!(matches!(result, Err(AssessError::Config(_))));
    }
}
