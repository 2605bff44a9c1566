//! LLM-backed seismic risk narrative generation for Quakescope.
//!
//! Given the nearby events found by the catalog's proximity filter, this
//! crate builds a plain-text historical summary, renders it into a prompt,
//! and asks an external text-generation service for a short risk
//! assessment.
//!
//! # Architecture
//!
//! ```text
//! ScoredEvents --> summary --> PromptEngine --> GenerationBackend --> text
//! ```
//!
//! The generated text is expected to open with [`prompt::DISCLAIMER`].

pub mod assess;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod summary;

pub use assess::{Assessment, Assessor, FALLBACK_ASSESSMENT};
pub use config::{BackendType, GenerationConfig};
pub use error::AssessError;
pub use llm::{GenerationBackend, create_backend};
pub use prompt::{DISCLAIMER, PromptEngine, RenderedPrompt};
pub use summary::{HistoricalContext, historical_context};
