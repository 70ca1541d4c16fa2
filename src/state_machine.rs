//! Core conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! Two states, `Idle` and `Awaiting`; at most one inference request is in
//! flight because a submit is only accepted from `Idle`.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::ConvState;
pub use transition::{transition, TransitionError};
