//! Effects produced by state transitions

use crate::conversation::Sender;

/// Effects to be executed, in order, after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the conversation
    AppendMessage { sender: Sender, text: String },

    /// Send `text` to the inference endpoint
    RequestInference { text: String },

    /// Tell connected clients the busy flag changed
    NotifyStateChange { busy: bool },
}

impl Effect {
    pub fn append_user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn append_assistant_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}
