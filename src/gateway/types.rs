//! Gateway data types

use serde::{Deserialize, Serialize};

/// Gemini model variants backing the demo panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    /// Grounded intelligence summaries
    Gemini3Pro,
    /// Fast forensic analysis
    Gemini3Flash,
}

impl GeminiModel {
    pub fn api_name(self) -> &'static str {
        match self {
            GeminiModel::Gemini3Pro => "gemini-3-pro-preview",
            GeminiModel::Gemini3Flash => "gemini-3-flash-preview",
        }
    }
}

/// A single text-generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: GeminiModel,
    pub prompt: String,
    /// Ask the provider to ground the answer with its web-search tool
    pub web_search: bool,
}

/// Normalized provider response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Main answer text; empty when the provider returned no text parts
    pub text: String,
    /// Grounding chunks in provider order
    pub chunks: Vec<GroundingChunk>,
}

/// Citation-like object linking part of the answer to a web source.
///
/// `web` is absent for chunks grounded in non-web sources; those are
/// dropped before presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSource {
    pub uri: String,
    pub title: Option<String>,
}

/// A citation surfaced to presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

/// Settled result of an intelligence query. Replaced wholesale by the next
/// query, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceResult {
    pub summary_text: String,
    pub citations: Vec<Citation>,
}

/// Settled result of a forensic analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub report_text: String,
}
