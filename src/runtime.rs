//! Runtime for the conversation
//!
//! A single background task owns the conversation state and message list.
//! Everything else talks to it through a [`ConversationHandle`]: events go in
//! over a channel, snapshots and client notifications come out.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;

use crate::conversation::{Conversation, Message};
use crate::llm::InferenceClient;
use crate::state_machine::{ConvState, Event};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, watch};

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SseEvent {
    Init {
        messages: Vec<Message>,
        busy: bool,
    },
    Message {
        message: Message,
    },
    StateChange {
        busy: bool,
    },
    Error {
        message: String,
    },
}

/// Point-in-time view of the conversation
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub busy: bool,
}

impl ConversationSnapshot {
    pub fn new(conversation: &Conversation, state: ConvState) -> Self {
        Self {
            messages: conversation.messages().to_vec(),
            busy: state.is_busy(),
        }
    }
}

/// Handle to interact with the running conversation
#[derive(Clone)]
pub struct ConversationHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_rx: watch::Receiver<ConversationSnapshot>,
}

impl ConversationHandle {
    /// Start a conversation runtime in the background
    pub fn spawn(client: InferenceClient) -> Self {
        let conversation = Conversation::with_greeting();
        let state = ConvState::Idle;

        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) =
            watch::channel(ConversationSnapshot::new(&conversation, state));

        let runtime = ConversationRuntime::new(
            state,
            conversation,
            client,
            event_rx,
            event_tx.downgrade(),
            broadcast_tx.clone(),
            snapshot_tx,
        );

        tokio::spawn(runtime.run());

        Self {
            event_tx,
            broadcast_tx,
            snapshot_rx,
        }
    }

    /// Hand the user's input buffer to the conversation
    ///
    /// Blank input and submissions made while a reply is pending are
    /// dropped by the state machine.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), String> {
        self.event_tx
            .send(Event::user_submit(text))
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Current messages and busy flag
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    #[cfg(test)]
    pub fn watch(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to conversation updates
    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.broadcast_tx.subscribe()
    }
}
