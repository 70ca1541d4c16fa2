//! Inference client
//!
//! Sends one user message to the configured [`LlmService`] and reconciles
//! whatever comes back into an [`InferenceResult`]. No failure escapes: a
//! transport error becomes [`APOLOGY_MESSAGE`], and output that is not the
//! requested JSON shape is passed through as plain text.

use super::decode::{decode_model_output, ModelOutput};
use super::prompt::build_prompt;
use super::types::InferenceResult;
use super::LlmService;
use std::sync::Arc;

/// Reply shown when the inference endpoint cannot be reached or answers badly
pub const APOLOGY_MESSAGE: &str =
    "I'm sorry, I encountered an error while processing your request. Please try again.";

/// Translates user text into one inference request and its reply into a result
#[derive(Clone)]
pub struct InferenceClient {
    service: Arc<dyn LlmService>,
}

impl InferenceClient {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self { service }
    }

    pub fn model_id(&self) -> &str {
        self.service.model_id()
    }

    /// Ask the model about `text`. Always yields a non-empty reply.
    pub async fn infer(&self, text: &str) -> InferenceResult {
        let prompt = build_prompt(text);

        let raw = match self.service.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    model = %self.service.model_id(),
                    error = %e,
                    kind = ?e.kind,
                    "Error calling inference endpoint"
                );
                return InferenceResult::new(APOLOGY_MESSAGE);
            }
        };

        if raw.trim().is_empty() {
            tracing::warn!(model = %self.service.model_id(), "Model returned empty output");
            return InferenceResult::new(APOLOGY_MESSAGE);
        }

        match decode_model_output(&raw) {
            ModelOutput::Structured(reply) => {
                if !reply.suggested_events.is_empty() {
                    tracing::debug!(
                        count = reply.suggested_events.len(),
                        "Model suggested calendar events"
                    );
                }
                InferenceResult::new(reply.message).with_suggestions(reply.suggested_events)
            }
            ModelOutput::RawText(text) => {
                tracing::debug!("Model output was not structured, passing through raw text");
                InferenceResult::new(text)
            }
        }
    }
}
