//! Pure state transition function

use super::{DemoMode, DemoSnapshot, Effect, Event, Outcome, RequestState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub snapshot: DemoSnapshot,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(snapshot: DemoSnapshot) -> Self {
        Self {
            snapshot,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. `Busy` and `EmptyInput` are
/// rejections of user input and leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A request is already in flight; duplicate submissions are dropped
    /// rather than queued
    #[error("a request is already in flight")]
    Busy,
    /// Analysis submissions require a non-blank payload
    #[error("analysis payload is empty")]
    EmptyInput,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function: same inputs, same outputs, no I/O.
pub fn transition(
    snapshot: &DemoSnapshot,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // Tab switching is legal in every state and cancels nothing.
        Event::SelectMode { mode } => {
            let mut next = snapshot.clone();
            next.active_mode = mode;
            Ok(TransitionResult::new(next).with_effect(Effect::Broadcast))
        }

        Event::Submit { .. } if snapshot.request_state.is_in_flight() => {
            Err(TransitionError::Busy)
        }

        // The analysis panel requires a non-blank payload before any call
        // is made. Intelligence queries are sent even when empty.
        Event::Submit {
            mode: DemoMode::Analysis,
            ref input,
        } if input.trim().is_empty() => Err(TransitionError::EmptyInput),

        Event::Submit { mode, input } => {
            let mut next = snapshot.clone();
            next.request_state = RequestState::InFlight { mode };
            Ok(TransitionResult::new(next)
                .with_effect(Effect::CallGateway { mode, input })
                .with_effect(Effect::Broadcast))
        }

        Event::Settled { outcome } => match snapshot.request_state {
            RequestState::InFlight { mode } if mode == outcome.mode() => {
                let mut next = snapshot.clone();
                next.request_state = RequestState::Idle;
                match outcome {
                    Outcome::Intelligence(result) => next.intelligence = Some(result),
                    Outcome::Analysis(result) => next.analysis = Some(result),
                }
                Ok(TransitionResult::new(next).with_effect(Effect::Broadcast))
            }
            _ => Err(TransitionError::InvalidTransition(format!(
                "settled {:?} while {:?}",
                outcome.mode(),
                snapshot.request_state
            ))),
        },
    }
}
