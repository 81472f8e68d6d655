//! Vanguard - threat-intelligence demo site
//!
//! Serves the marketing page and backs its two demo panels with calls to
//! the Gemini generative-language API. The page holds no credentials; the
//! server owns the API key and pushes demo state to the page over SSE.

mod api;
mod config;
mod demo;
mod gateway;
mod runtime;

use api::{create_router, AppState};
use config::Config;
use gateway::{DemoGateway, GeminiClient, GenerateText, LoggingClient};
use runtime::DemoRuntime;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vanguard=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    if config.gemini_api_key.is_none() && config.gateway.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; demo calls will fail until configured");
    }

    let api_key = config.gemini_api_key.clone().unwrap_or_default();
    let gemini = GeminiClient::new(api_key, config.gateway.as_deref())?;
    let client: Arc<dyn GenerateText> = Arc::new(LoggingClient::new(Arc::new(gemini)));

    let runtime = DemoRuntime::new(DemoGateway::new(client));
    let state = AppState { runtime };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Vanguard demo site listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
