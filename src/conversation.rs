//! Conversation messages
//!
//! The conversation is an append-only list. Messages are never edited or
//! removed once pushed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opening message every conversation starts with
pub const GREETING: &str = "Hello! I'm your AI calendar assistant. How can I help you today?";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One conversation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered message list of a single conversation
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// A conversation holding only the assistant greeting
    pub fn with_greeting() -> Self {
        let mut conversation = Self::default();
        conversation.append(Sender::Assistant, GREETING);
        conversation
    }

    /// Append a message and return a copy of it
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        let message = Message::new(sender, text);
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
