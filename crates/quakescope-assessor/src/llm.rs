//! Generation backend abstraction and implementations.
//!
//! Defines an enum-based dispatch for text-generation backends, avoiding
//! the dyn-compatibility issues with async trait methods. Concrete
//! implementations exist for the Gemini `generateContent` API and for
//! OpenAI-compatible chat completions. All backends communicate over HTTP
//! via `reqwest`.
//!
//! A single attempt is made per request. Content-safety refusals are
//! reported as [`AssessError::SafetyBlocked`] so callers can tell them apart
//! from transport or upstream failures.

use crate::config::{BackendType, GenerationConfig};
use crate::error::AssessError;
use crate::prompt::RenderedPrompt;

/// Gemini finish reasons that mean the output was withheld for safety.
const GEMINI_BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

// ---------------------------------------------------------------------------
// Unified backend enum (dyn-compatible alternative to async trait)
// ---------------------------------------------------------------------------

/// A generation backend that turns a prompt into assessment text.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust.
pub enum GenerationBackend {
    /// Google Gemini `generateContent` API.
    Gemini(GeminiBackend),
    /// OpenAI-compatible chat completions API.
    OpenAi(OpenAiBackend),
}

impl GenerationBackend {
    /// Send a prompt and return the generated text.
    ///
    /// The text may be empty if the backend produced nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::SafetyBlocked`] on a content-safety refusal
    /// and [`AssessError::Backend`] for any other failure.
    pub async fn generate(&self, prompt: &RenderedPrompt) -> Result<String, AssessError> {
        match self {
            Self::Gemini(backend) => backend.generate(prompt).await,
            Self::OpenAi(backend) => backend.generate(prompt).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Gemini(_) => "gemini",
            Self::OpenAi(_) => "openai-compatible",
        }
    }
}

// ---------------------------------------------------------------------------
// Gemini backend
// ---------------------------------------------------------------------------

/// Backend for the Google Gemini `generateContent` API.
///
/// Sends requests to `{api_url}/models/{model}:generateContent` with the
/// key in the `x-goog-api-key` header.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a prompt and return the response text.
    async fn generate(&self, prompt: &RenderedPrompt) -> Result<String, AssessError> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let body = serde_json::json!({
            "systemInstruction": {
                "parts": [{"text": prompt.system}]
            },
            "contents": [
                {"role": "user", "parts": [{"text": prompt.user}]}
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssessError::Backend(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AssessError::Backend(format!(
                "Gemini returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AssessError::Backend(format!("Gemini response parse failed: {e}")))?;

        extract_gemini_text(&json)
    }
}

/// Extract the generated text from a Gemini `generateContent` response.
///
/// A prompt-level `blockReason` or a safety finish reason on the first
/// candidate is a [`AssessError::SafetyBlocked`]. Otherwise the text of
/// every part of the first candidate is concatenated.
fn extract_gemini_text(json: &serde_json::Value) -> Result<String, AssessError> {
    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(serde_json::Value::as_str)
    {
        return Err(AssessError::SafetyBlocked(format!("prompt blocked: {reason}")));
    }

    let candidate = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or_else(|| AssessError::Backend("Gemini response missing candidates[0]".to_owned()))?;

    if let Some(reason) = candidate
        .get("finishReason")
        .and_then(serde_json::Value::as_str)
        .filter(|r| GEMINI_BLOCKED_FINISH_REASONS.contains(r))
    {
        return Err(AssessError::SafetyBlocked(format!("response blocked: {reason}")));
    }

    let text = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(serde_json::Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(serde_json::Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for OpenAI-compatible chat completions APIs.
///
/// Works with `OpenAI`, `DeepSeek`, and Ollama endpoints.
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a prompt and return the response text.
    async fn generate(&self, prompt: &RenderedPrompt) -> Result<String, AssessError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.4,
            "max_tokens": 512
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssessError::Backend(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AssessError::Backend(format!(
                "OpenAI returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AssessError::Backend(format!("OpenAI response parse failed: {e}")))?;

        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
///
/// A `content_filter` finish reason is a [`AssessError::SafetyBlocked`];
/// a null message content is treated as empty output.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, AssessError> {
    let choice = json
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| AssessError::Backend("OpenAI response missing choices[0]".to_owned()))?;

    if choice.get("finish_reason").and_then(serde_json::Value::as_str) == Some("content_filter") {
        return Err(AssessError::SafetyBlocked(
            "response blocked: content_filter".to_owned(),
        ));
    }

    Ok(choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create a generation backend from configuration.
///
/// Dispatches to [`GeminiBackend`] or [`OpenAiBackend`] based on the
/// configured [`BackendType`].
pub fn create_backend(config: &GenerationConfig) -> GenerationBackend {
    match config.backend_type {
        BackendType::Gemini => GenerationBackend::Gemini(GeminiBackend::new(config)),
        BackendType::OpenAi => GenerationBackend::OpenAi(OpenAiBackend::new(config)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extract_gemini_text_joins_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Disclaimer: Earthquakes cannot be predicted with certainty.\n\n"},
                        {"text": "Moderate activity."}
                    ]
                },
                "finishReason": "STOP"
            }]
        });
        let text = extract_gemini_text(&json).unwrap();
        assert!(text.starts_with("Disclaimer:"));
        assert!(text.ends_with("Moderate activity."));
    }

    #[test]
    fn extract_gemini_text_prompt_blocked() {
        let json = serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        });
        let result = extract_gemini_text(&json);
        assert!(result.unwrap_err().is_safety_block());
    }

    #[test]
    fn extract_gemini_text_candidate_blocked() {
        let json = serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        });
        let result = extract_gemini_text(&json);
        assert!(result.unwrap_err().is_safety_block());
    }

    #[test]
    fn extract_gemini_text_missing_candidates() {
        let json = serde_json::json!({"error": "quota"});
        let result = extract_gemini_text(&json);
        assert!(matches!(result, Err(AssessError::Backend(_))));
    }

    #[test]
    fn extract_gemini_text_without_parts_is_empty() {
        let json = serde_json::json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        });
        assert_eq!(extract_gemini_text(&json).unwrap(), "");
    }

    #[test]
    fn extract_openai_content_valid() {
        let json = serde_json::json!({
            "choices": [{
                "message": {"content": "Low activity."},
                "finish_reason": "stop"
            }]
        });
        assert_eq!(extract_openai_content(&json).unwrap(), "Low activity.");
    }

    #[test]
    fn extract_openai_content_filtered() {
        let json = serde_json::json!({
            "choices": [{"message": {"content": null}, "finish_reason": "content_filter"}]
        });
        let result = extract_openai_content(&json);
        assert!(result.unwrap_err().is_safety_block());
    }

    #[test]
    fn extract_openai_content_missing_choices() {
        let json = serde_json::json!({"error": "rate_limit"});
        assert!(matches!(
            extract_openai_content(&json),
            Err(AssessError::Backend(_))
        ));
    }

    #[test]
    fn create_backend_dispatches_correctly() {
        let gemini_config = GenerationConfig {
            backend_type: BackendType::Gemini,
            api_url: "https://generativelanguage.googleapis.com/v1beta/".to_owned(),
            api_key: "test".to_owned(),
            model: "gemini-1.5-flash".to_owned(),
            templates_dir: None,
        };
        let backend = create_backend(&gemini_config);
        assert_eq!(backend.name(), "gemini");

        let openai_config = GenerationConfig {
            backend_type: BackendType::OpenAi,
            api_url: "https://api.openai.com/v1".to_owned(),
            api_key: "test".to_owned(),
            model: "test-model".to_owned(),
            templates_dir: None,
        };
        let backend = create_backend(&openai_config);
        assert_eq!(backend.name(), "openai-compatible");
    }
}
