//! Structured decode of raw model output
//!
//! The model is asked for a JSON object but is free to ignore the request.
//! [`decode_model_output`] makes one attempt at the structured shape and
//! otherwise hands back the raw text.

use super::types::EventSuggestion;
use serde::Deserialize;
use serde_json::Value;

/// Reply in the shape the prompt template asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredReply {
    pub message: String,
    pub suggested_events: Vec<EventSuggestion>,
}

/// Result of interpreting raw model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOutput {
    Structured(StructuredReply),
    RawText(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReply {
    message: String,
    #[serde(default)]
    suggested_events: Value,
}

/// Interpret raw model output as a structured reply, falling back to raw text
pub fn decode_model_output(raw: &str) -> ModelOutput {
    let candidate = strip_code_fence(raw.trim());

    let Ok(wire) = serde_json::from_str::<WireReply>(candidate) else {
        return ModelOutput::RawText(raw.to_string());
    };

    if wire.message.trim().is_empty() {
        return ModelOutput::RawText(raw.to_string());
    }

    let suggested_events = match wire.suggested_events {
        Value::Null => Vec::new(),
        value => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Discarding undecodable suggestedEvents");
            Vec::new()
        }),
    };

    ModelOutput::Structured(StructuredReply {
        message: wire.message,
        suggested_events,
    })
}

/// Extract the body of a Markdown code fence, if the text is one
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    match body.split_once('\n') {
        Some((info, content)) if is_info_string(info.trim()) => content.trim(),
        _ => body.trim(),
    }
}

fn is_info_string(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}
