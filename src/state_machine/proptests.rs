//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use crate::conversation::{Conversation, Sender};
use crate::llm::InferenceResult;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![Just(ConvState::Idle), Just(ConvState::Awaiting)]
}

fn arb_meaningful_text() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[a-zA-Z0-9?!.,]{1,20}( [a-zA-Z0-9]{1,10}){0,4}[ \n]{0,3}"
}

fn arb_blank_text() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,8}"
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_meaningful_text().prop_map(|text| Event::UserSubmit { text }),
        arb_blank_text().prop_map(|text| Event::UserSubmit { text }),
        "[a-zA-Z ]{1,30}".prop_map(|reply| Event::InferenceComplete {
            result: InferenceResult::new(reply),
        }),
    ]
}

// ============================================================================
// Harness
// ============================================================================

/// Applies transitions the way the runtime does, minus the network call
struct Harness {
    state: ConvState,
    conversation: Conversation,
    in_flight: usize,
    max_in_flight: usize,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: ConvState::Idle,
            conversation: Conversation::with_greeting(),
            in_flight: 0,
            max_in_flight: 0,
        }
    }

    fn apply(&mut self, event: Event) {
        if matches!(event, Event::InferenceComplete { .. }) && self.in_flight > 0 {
            self.in_flight -= 1;
        }
        let Ok(result) = transition(self.state, event) else {
            return;
        };
        self.state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { sender, text } => {
                    self.conversation.append(sender, text);
                }
                Effect::RequestInference { .. } => {
                    self.in_flight += 1;
                    self.max_in_flight = self.max_in_flight.max(self.in_flight);
                }
                Effect::NotifyStateChange { busy } => {
                    assert_eq!(busy, self.state.is_busy());
                }
            }
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn idle_submit_appends_user_message_before_request(text in arb_meaningful_text()) {
        let result = transition(ConvState::Idle, Event::UserSubmit { text: text.clone() }).unwrap();
        prop_assert_eq!(result.new_state, ConvState::Awaiting);

        let append_pos = result.effects.iter().position(|e| matches!(
            e,
            Effect::AppendMessage { sender: Sender::User, .. }
        ));
        let request_pos = result.effects.iter().position(|e| matches!(e, Effect::RequestInference { .. }));
        prop_assert!(append_pos.is_some());
        prop_assert!(request_pos.is_some());
        prop_assert!(append_pos < request_pos);

        let user_appends = result.effects.iter().filter(|e| matches!(e, Effect::AppendMessage { .. })).count();
        prop_assert_eq!(user_appends, 1);

        let trimmed = text.trim().to_string();
        prop_assert!(result.effects.contains(&Effect::append_user_message(trimmed.clone())));
        let request = Effect::RequestInference { text: trimmed };
        prop_assert!(result.effects.contains(&request));
    }

    #[test]
    fn awaiting_ignores_every_submit(text in prop_oneof![arb_meaningful_text(), arb_blank_text()]) {
        let submit = Event::UserSubmit { text };
        prop_assert!(transition(ConvState::Awaiting, submit).is_err());
    }

    #[test]
    fn blank_input_is_rejected_in_any_state(state in arb_state(), text in arb_blank_text()) {
        prop_assert_eq!(
            transition(state, Event::UserSubmit { text }).unwrap_err(),
            TransitionError::EmptyInput
        );
    }

    #[test]
    fn random_event_sequences_keep_invariants(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut harness = Harness::new();

        for event in events {
            let before_len = harness.conversation.len();
            let before_state = harness.state;
            let is_submit = matches!(event, Event::UserSubmit { .. });

            harness.apply(event);

            if is_submit && before_state == ConvState::Awaiting {
                prop_assert_eq!(harness.conversation.len(), before_len);
                prop_assert_eq!(harness.state, ConvState::Awaiting);
            }
            prop_assert!(harness.conversation.len() <= before_len + 1);
        }

        prop_assert!(harness.max_in_flight <= 1);

        // After the greeting, user and assistant strictly alternate
        let senders: Vec<Sender> = harness.conversation.messages().iter().map(|m| m.sender).collect();
        prop_assert_eq!(senders[0], Sender::Assistant);
        for (i, sender) in senders.iter().enumerate().skip(1) {
            let expected = if i % 2 == 1 { Sender::User } else { Sender::Assistant };
            prop_assert_eq!(*sender, expected);
        }

        // Busy exactly when the last message is an unanswered user entry
        let last_is_user = senders.last() == Some(&Sender::User);
        prop_assert_eq!(harness.state.is_busy(), last_is_user);
    }
}
