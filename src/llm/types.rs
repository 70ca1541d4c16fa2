//! Common types for inference results

use serde::{Deserialize, Serialize};

/// A calendar entry proposed by the model
///
/// No identifier is assigned here; suggestions are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSuggestion {
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcome of one request to the inference endpoint
///
/// `message` is never empty. Failures are folded into this shape by the
/// [`InferenceClient`](super::InferenceClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    pub message: String,
    #[serde(default)]
    pub suggested_events: Vec<EventSuggestion>,
}

impl InferenceResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggested_events: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<EventSuggestion>) -> Self {
        self.suggested_events = suggestions;
        self
    }
}
