//! Conversation state types

use serde::{Deserialize, Serialize};

/// Conversation state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Ready for user input, no pending request
    #[default]
    Idle,

    /// Inference request in flight; further submissions are ignored
    Awaiting,
}

impl ConvState {
    /// The busy flag shown to clients
    pub fn is_busy(self) -> bool {
        matches!(self, ConvState::Awaiting)
    }

    pub fn name(self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::Awaiting => "awaiting",
        }
    }
}
