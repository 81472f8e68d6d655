//! Request gateway to the generative-text service
//!
//! Translates user-typed demo input into a single provider call and
//! normalizes the response. Failures never escape this module: every error
//! is folded into the fixed string the page displays for that panel.

mod error;
mod gemini;
mod types;

pub use error::{GatewayError, GatewayErrorKind};
pub use gemini::GeminiClient;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Fallback summary when the provider returns no text
pub const NO_INTELLIGENCE: &str = "No intelligence found.";
/// Displayed when an intelligence call fails for any reason
pub const INTELLIGENCE_FALLBACK: &str = "Intelligence engine timeout. Please retry.";
/// Fallback report when the provider returns no text
pub const EMPTY_ANALYSIS: &str = "Empty analysis.";
/// Displayed when an analysis call fails for any reason
pub const ANALYSIS_FALLBACK: &str = "Analysis engine failure.";

/// Citations beyond the first four grounding chunks are discarded
const MAX_CITATIONS: usize = 4;

/// Common interface to the text-generation provider
#[async_trait]
pub trait GenerateText: Send + Sync {
    /// Issue one generation request
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError>;
}

/// Logging wrapper for generation clients
pub struct LoggingClient {
    inner: Arc<dyn GenerateText>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn GenerateText>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GenerateText for LoggingClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(generation) => {
                tracing::info!(
                    model = request.model.api_name(),
                    duration_ms = %duration.as_millis(),
                    chars = generation.text.len(),
                    chunks = generation.chunks.len(),
                    "Generation request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = request.model.api_name(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Generation request failed"
                );
            }
        }

        result
    }
}

fn intelligence_prompt(query: &str) -> String {
    format!(
        "Provide a critical executive summary for: {query}. \
         Highlight technical markers and active campaigns."
    )
}

fn analysis_prompt(payload: &str) -> String {
    format!("Forensic Analysis of: \n\n {payload} \n\n Provide RISK SCORE, VECTOR, and MITIGATION.")
}

/// The demo's request gateway. One outbound call per invocation, no retry,
/// no caching; identical inputs re-query the provider every time.
pub struct DemoGateway {
    client: Arc<dyn GenerateText>,
}

impl DemoGateway {
    pub fn new(client: Arc<dyn GenerateText>) -> Self {
        Self { client }
    }

    /// One grounded Pro call for the intelligence panel.
    ///
    /// Infallible by design: failures become [`INTELLIGENCE_FALLBACK`] with
    /// an empty citation list.
    pub async fn fetch_intelligence(&self, query: &str) -> IntelligenceResult {
        let request = GenerationRequest {
            model: GeminiModel::Gemini3Pro,
            prompt: intelligence_prompt(query),
            web_search: true,
        };

        match self.client.generate(&request).await {
            Ok(generation) => {
                let summary_text = if generation.text.is_empty() {
                    NO_INTELLIGENCE.to_string()
                } else {
                    generation.text
                };

                // First four chunks, web-less ones dropped. A web-less chunk
                // inside the window still consumes its slot.
                let citations = generation
                    .chunks
                    .into_iter()
                    .take(MAX_CITATIONS)
                    .filter_map(|chunk| chunk.web)
                    .map(|web| Citation {
                        title: web.title.unwrap_or_default(),
                        url: web.uri,
                    })
                    .collect();

                IntelligenceResult {
                    summary_text,
                    citations,
                }
            }
            Err(_) => IntelligenceResult {
                summary_text: INTELLIGENCE_FALLBACK.to_string(),
                citations: Vec::new(),
            },
        }
    }

    /// One Flash call for the forensics panel. Infallible by design:
    /// failures become [`ANALYSIS_FALLBACK`].
    pub async fn analyze_incident(&self, payload: &str) -> AnalysisResult {
        let request = GenerationRequest {
            model: GeminiModel::Gemini3Flash,
            prompt: analysis_prompt(payload),
            web_search: false,
        };

        match self.client.generate(&request).await {
            Ok(generation) if !generation.text.is_empty() => AnalysisResult {
                report_text: generation.text,
            },
            Ok(_) => AnalysisResult {
                report_text: EMPTY_ANALYSIS.to_string(),
            },
            Err(_) => AnalysisResult {
                report_text: ANALYSIS_FALLBACK.to_string(),
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted [`GenerateText`] implementation that records every request.
    pub struct FakeClient {
        responses: Mutex<VecDeque<Result<Generation, GatewayError>>>,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeClient {
        pub fn new(responses: Vec<Result<Generation, GatewayError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerateText for FakeClient {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<Generation, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::unknown("fake client exhausted")))
        }
    }

    pub fn chunk(uri: &str, title: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.to_string(),
                title: title.map(str::to_string),
            }),
        }
    }

    pub fn webless_chunk() -> GroundingChunk {
        GroundingChunk { web: None }
    }
}
