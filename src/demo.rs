//! Demo interaction state machine
//!
//! Elm-style: pure transitions over an explicit state struct. The runtime
//! interprets the resulting effects; nothing here performs I/O.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, Outcome};
pub use state::{DemoMode, DemoSnapshot, RequestState};
pub use transition::{transition, TransitionError, TransitionResult};
