//! Pure state transition function

use super::{ConvState, Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event was not applied
///
/// None of these are failures from the user's point of view: the runtime
/// drops the event and leaves the conversation untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Assistant is busy, submission ignored")]
    Busy,
    #[error("Empty input, submission ignored")]
    EmptyInput,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs and performs no
/// I/O. The user message effect is emitted before the inference request so
/// the user's entry always precedes the reply.
pub fn transition(state: ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Blank input is a no-op in either state
        (_, Event::UserSubmit { text }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyInput)
        }

        // Idle + UserSubmit -> Awaiting
        (ConvState::Idle, Event::UserSubmit { text }) => {
            let text = text.trim().to_string();
            Ok(TransitionResult::new(ConvState::Awaiting)
                .with_effect(Effect::append_user_message(text.clone()))
                .with_effect(Effect::NotifyStateChange { busy: true })
                .with_effect(Effect::RequestInference { text }))
        }

        // Awaiting + UserSubmit -> reject, one request in flight at most
        (ConvState::Awaiting, Event::UserSubmit { .. }) => Err(TransitionError::Busy),

        // Awaiting + InferenceComplete -> Idle
        (ConvState::Awaiting, Event::InferenceComplete { result }) => {
            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::append_assistant_message(result.message))
                .with_effect(Effect::NotifyStateChange { busy: false }))
        }

        (ConvState::Idle, Event::InferenceComplete { .. }) => Err(
            TransitionError::InvalidTransition("inference result with no request in flight".into()),
        ),
    }
}
