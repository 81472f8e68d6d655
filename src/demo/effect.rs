//! Effects produced by state transitions

use super::state::DemoMode;

/// Effects to be executed after a state transition. The transition function
/// is pure; all I/O happens when the runtime interprets these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the single outbound gateway call for this submission
    CallGateway { mode: DemoMode, input: String },
    /// Push the new snapshot to subscribers
    Broadcast,
}
