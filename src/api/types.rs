//! API request and response types

use crate::demo::DemoMode;
use serde::{Deserialize, Serialize};

/// Request to run an intelligence query
#[derive(Debug, Deserialize)]
pub struct IntelRequest {
    pub query: String,
}

/// Request to run a forensic analysis
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub payload: String,
}

/// Request to switch the visible demo panel
#[derive(Debug, Deserialize)]
pub struct SelectModeRequest {
    pub mode: DemoMode,
}

/// Response for submit actions. `accepted: false` covers the InFlight
/// debounce and the blank-payload guard; neither is an error.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
