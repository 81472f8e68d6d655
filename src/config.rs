//! Environment configuration

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the generative-language API. Absence is not a startup
    /// error; calls simply fail and fold into the demo's fallback strings.
    pub gemini_api_key: Option<String>,
    /// Optional gateway base URL fronting the Gemini API
    pub gateway: Option<String>,
    /// Listen port
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("VANGUARD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gateway: std::env::var("GEMINI_GATEWAY").ok(),
            port,
        }
    }
}
