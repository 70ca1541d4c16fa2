//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::{ConversationHandle, ConversationSnapshot};
use crate::llm::{LlmError, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Mock inference backend that returns queued outputs
pub struct MockLlmService {
    outputs: Mutex<VecDeque<Result<String, LlmError>>>,
    model_id: String,
    /// Record of all prompts received
    prompts: Mutex<Vec<String>>,
    /// When set, each request waits for [`MockLlmService::release`]
    gate: Option<Arc<Notify>>,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            outputs: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            prompts: Mutex::new(Vec::new()),
            gate: None,
            request_started: Arc::new(Notify::new()),
        }
    }

    /// Hold every request until the test releases it
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held request finish
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Queue a raw model output
    pub fn queue_output(&self, output: &str) {
        self.outputs.lock().unwrap().push_back(Ok(output.to_string()));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.outputs.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded prompts
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.request_started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock output queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Wait until the conversation is idle with `len` messages
pub async fn wait_for_idle(handle: &ConversationHandle, len: usize) -> ConversationSnapshot {
    let mut rx = handle.watch();
    tokio::time::timeout(Duration::from_secs(5), async move {
        rx.wait_for(|s| !s.busy && s.messages.len() == len)
            .await
            .map(|s| s.clone())
            .expect("runtime dropped the snapshot channel")
    })
    .await
    .expect("timed out waiting for conversation to go idle")
}
