//! Events that drive the demo state machine

use super::state::DemoMode;
use crate::gateway::{AnalysisResult, IntelligenceResult};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User pressed a demo panel's submit control
    Submit { mode: DemoMode, input: String },
    /// User switched the visible panel
    SelectMode { mode: DemoMode },
    /// The gateway call finished; failures were already folded into the
    /// result's fixed fallback text
    Settled { outcome: Outcome },
}

/// Settled value for the mode that was in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Intelligence(IntelligenceResult),
    Analysis(AnalysisResult),
}

impl Outcome {
    pub fn mode(&self) -> DemoMode {
        match self {
            Outcome::Intelligence(_) => DemoMode::Intelligence,
            Outcome::Analysis(_) => DemoMode::Analysis,
        }
    }
}
