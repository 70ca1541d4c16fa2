//! HTTP API for the chat widget

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::ConversationHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub conversation: ConversationHandle,
    /// Model name sent with every inference request
    pub model: String,
    /// Inference endpoint base URL
    pub endpoint: String,
}

impl AppState {
    pub fn new(
        conversation: ConversationHandle,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            conversation,
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }
}
