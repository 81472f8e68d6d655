//! Google Gemini client

use super::types::{GeminiModel, Generation, GenerationRequest, GroundingChunk, WebSource};
use super::{GatewayError, GenerateText};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DIRECT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// reqwest-based implementation of [`GenerateText`] against the
/// `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, gateway: Option<&str>) -> Result<Self, GatewayError> {
        let base_url = match gateway {
            // Gateway fronting the Gemini API
            Some(gw) => format!("{}/gemini/v1beta/models", gw.trim_end_matches('/')),
            // Direct Gemini API
            None => DIRECT_BASE_URL.to_string(),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| GatewayError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn endpoint(&self, model: GeminiModel) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url,
            model.api_name(),
            self.api_key
        )
    }

    fn translate_request(request: &GenerationRequest) -> GeminiRequest {
        let tools = request.web_search.then(|| {
            vec![GeminiTool {
                google_search: GoogleSearch {},
            }]
        });

        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            tools,
        }
    }

    fn normalize_response(resp: GeminiResponse) -> Result<Generation, GatewayError> {
        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::unknown("No candidates in response"))?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let chunks = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .map(|chunk| GroundingChunk {
                        web: chunk.web.map(|web| WebSource {
                            uri: web.uri,
                            title: web.title,
                        }),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Generation { text, chunks })
    }
}

#[async_trait]
impl GenerateText for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GatewayError> {
        let gemini_request = Self::translate_request(request);
        let url = self.endpoint(request.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    GatewayError::network(format!("Connection failed: {e}"))
                } else {
                    GatewayError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    400 => GatewayError::invalid_request(format!("Invalid request: {message}")),
                    401 | 403 => GatewayError::auth(format!("Authentication failed: {message}")),
                    429 => GatewayError::rate_limit(format!("Rate limit exceeded: {message}")),
                    500..=599 => GatewayError::server_error(format!("Server error: {message}")),
                    _ => GatewayError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(GatewayError::unknown(format!("HTTP {status} error: {body}")));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(gemini_response)
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GeminiGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GeminiGroundingChunk {
    web: Option<GeminiWebSource>,
}

#[derive(Debug, Deserialize)]
struct GeminiWebSource {
    #[serde(default)]
    uri: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[allow(dead_code)]
    code: Option<i32>,
    #[allow(dead_code)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayErrorKind;

    #[test]
    fn request_with_web_search_carries_google_search_tool() {
        let request = GenerationRequest {
            model: GeminiModel::Gemini3Pro,
            prompt: "hello".to_string(),
            web_search: true,
        };

        let wire = GeminiClient::translate_request(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert!(json["tools"][0]["googleSearch"].is_object());
    }

    #[test]
    fn request_without_web_search_omits_tools() {
        let request = GenerationRequest {
            model: GeminiModel::Gemini3Flash,
            prompt: "logs".to_string(),
            web_search: false,
        };

        let wire = GeminiClient::translate_request(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert!(json.get("tools").is_none());
    }

    #[test]
    fn normalize_extracts_text_and_grounding_chunks() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "APT activity "}, {"text": "observed."}]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com/a", "title": "Report A"}},
                        {"retrievedContext": {"uri": "internal://doc"}},
                        {"web": {"uri": "https://example.com/b"}}
                    ]
                }
            }]
        });

        let resp: GeminiResponse = serde_json::from_value(body).unwrap();
        let generation = GeminiClient::normalize_response(resp).unwrap();

        assert_eq!(generation.text, "APT activity observed.");
        assert_eq!(generation.chunks.len(), 3);
        assert_eq!(
            generation.chunks[0].web.as_ref().unwrap().uri,
            "https://example.com/a"
        );
        assert!(generation.chunks[1].web.is_none());
        assert!(generation.chunks[2].web.as_ref().unwrap().title.is_none());
    }

    #[test]
    fn normalize_without_candidates_is_an_error() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        let err = GeminiClient::normalize_response(resp).unwrap_err();
        assert_eq!(err.kind, GatewayErrorKind::Unknown);
    }

    #[test]
    fn normalize_without_text_parts_yields_empty_text() {
        let body = serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": []}}]
        });

        let resp: GeminiResponse = serde_json::from_value(body).unwrap();
        let generation = GeminiClient::normalize_response(resp).unwrap();

        assert!(generation.text.is_empty());
        assert!(generation.chunks.is_empty());
    }

    #[test]
    fn gateway_override_rewrites_base_url() {
        let client =
            GeminiClient::new("k".to_string(), Some("https://gw.internal/llm/")).unwrap();
        let url = client.endpoint(GeminiModel::Gemini3Flash);
        assert_eq!(
            url,
            "https://gw.internal/llm/gemini/v1beta/models/gemini-3-flash-preview:generateContent?key=k"
        );
    }
}
