//! Conversation runtime executor

use super::{ConversationSnapshot, SseEvent};
use crate::conversation::Conversation;
use crate::llm::InferenceClient;
use crate::state_machine::{transition, ConvState, Effect, Event, TransitionError};
use tokio::sync::{broadcast, mpsc, watch};

/// Sole owner and mutator of the conversation state and message list
pub struct ConversationRuntime {
    state: ConvState,
    conversation: Conversation,
    client: InferenceClient,
    event_rx: mpsc::Receiver<Event>,
    /// Used by inference tasks to report their result. Weak so the runtime
    /// stops once every handle is dropped.
    event_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_tx: watch::Sender<ConversationSnapshot>,
}

impl ConversationRuntime {
    pub fn new(
        state: ConvState,
        conversation: Conversation,
        client: InferenceClient,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        broadcast_tx: broadcast::Sender<SseEvent>,
        snapshot_tx: watch::Sender<ConversationSnapshot>,
    ) -> Self {
        Self {
            state,
            conversation,
            client,
            event_rx,
            event_tx,
            broadcast_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(model = %self.client.model_id(), "Starting conversation runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!("Conversation runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(self.state, event) {
            Ok(r) => r,
            Err(e @ (TransitionError::Busy | TransitionError::EmptyInput)) => {
                tracing::debug!(state = self.state.name(), reason = %e, "Submission ignored");
                return;
            }
            Err(e @ TransitionError::InvalidTransition(_)) => {
                tracing::warn!(state = self.state.name(), error = %e, "Dropping event");
                let _ = self.broadcast_tx.send(SseEvent::Error {
                    message: e.to_string(),
                });
                return;
            }
        };

        let old_state = std::mem::replace(&mut self.state, result.new_state);
        tracing::debug!(from = old_state.name(), to = self.state.name(), "State transition");

        for effect in result.effects {
            self.execute_effect(effect);
        }

        self.publish_snapshot();
    }

    /// Must run before any broadcast, so a client that subscribes and then
    /// reads the snapshot cannot miss an update.
    fn publish_snapshot(&self) {
        self.snapshot_tx
            .send_replace(ConversationSnapshot::new(&self.conversation, self.state));
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { sender, text } => {
                let message = self.conversation.append(sender, text);
                tracing::debug!(
                    id = %message.id,
                    sender = ?message.sender,
                    count = self.conversation.len(),
                    "Message appended"
                );
                self.publish_snapshot();
                let _ = self.broadcast_tx.send(SseEvent::Message { message });
            }

            Effect::NotifyStateChange { busy } => {
                self.publish_snapshot();
                let _ = self.broadcast_tx.send(SseEvent::StateChange { busy });
            }

            Effect::RequestInference { text } => {
                // The only suspension point. The runtime keeps consuming events
                // while this runs, so submissions meanwhile meet `Awaiting`.
                let client = self.client.clone();
                let Some(event_tx) = self.event_tx.upgrade() else {
                    tracing::warn!("All conversation handles dropped, skipping inference");
                    return;
                };
                tokio::spawn(async move {
                    tracing::info!(chars = text.len(), "Making inference request (background)");
                    let result = client.infer(&text).await;
                    if event_tx
                        .send(Event::InferenceComplete { result })
                        .await
                        .is_err()
                    {
                        tracing::warn!("Runtime gone before inference result was delivered");
                    }
                });
            }
        }
    }
}
