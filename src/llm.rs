//! LLM provider abstraction
//!
//! The inference endpoint is reached through [`LlmService`]. The
//! [`InferenceClient`] sits on top of it and turns every outcome, including
//! transport failures, into an [`InferenceResult`].

mod config;
mod decode;
mod error;
mod inference;
mod ollama;
mod prompt;
mod types;

#[cfg(test)]
pub mod testing;

pub use config::LlmConfig;
#[allow(unused_imports)] // Public API re-exports
pub use error::{LlmError, LlmErrorKind};
pub use inference::{InferenceClient, APOLOGY_MESSAGE};
pub use ollama::OllamaService;
#[allow(unused_imports)] // Public API re-exports
pub use types::{EventSuggestion, InferenceResult};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for text-generation backends
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Send one prompt and return the raw model output
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(output) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    prompt_chars = prompt.len(),
                    output_chars = output.len(),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
