//! Demo interaction state

use crate::gateway::{AnalysisResult, IntelligenceResult};
use serde::{Deserialize, Serialize};

/// Which demo panel a submission targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoMode {
    Intelligence,
    Analysis,
}

/// Request lifecycle. At most one request is in flight at a time; the flag
/// is informational for disabling resubmission, not a mutual-exclusion
/// primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    InFlight {
        mode: DemoMode,
    },
}

impl RequestState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }
}

/// The full interaction state the page renders from.
///
/// Result slots are replaced wholesale on settlement, never merged or
/// appended. Nothing here is persisted; the struct lives for the lifetime
/// of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSnapshot {
    pub active_mode: DemoMode,
    pub request_state: RequestState,
    pub intelligence: Option<IntelligenceResult>,
    pub analysis: Option<AnalysisResult>,
}

impl Default for DemoSnapshot {
    fn default() -> Self {
        Self {
            active_mode: DemoMode::Intelligence,
            request_state: RequestState::Idle,
            intelligence: None,
            analysis: None,
        }
    }
}
