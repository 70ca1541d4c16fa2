//! Events that can occur in a conversation

use crate::llm::InferenceResult;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user pressed send with this input buffer
    UserSubmit { text: String },

    /// The inference request issued for the last submission resolved
    InferenceComplete { result: InferenceResult },
}

impl Event {
    pub fn user_submit(text: impl Into<String>) -> Self {
        Event::UserSubmit { text: text.into() }
    }
}
