//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{AnalyzeRequest, ErrorResponse, IntelRequest, SelectModeRequest, SubmitResponse};
use super::AppState;
use crate::demo::{DemoMode, DemoSnapshot, TransitionError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // The landing page
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Demo state
        .route("/api/demo", get(get_demo))
        .route("/api/demo/stream", get(stream_demo))
        .route("/api/demo/mode", post(select_mode))
        // Demo submissions
        .route("/api/intel", post(submit_intel))
        .route("/api/analyze", post(submit_analysis))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - site assets not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Demo State
// ============================================================

async fn get_demo(State(state): State<AppState>) -> Json<DemoSnapshot> {
    Json(state.runtime.snapshot().await)
}

async fn stream_demo(State(state): State<AppState>) -> impl IntoResponse {
    let init = state.runtime.snapshot().await;
    let broadcast_rx = state.runtime.subscribe();
    sse_stream(init, broadcast_rx)
}

async fn select_mode(
    State(state): State<AppState>,
    Json(req): Json<SelectModeRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    state
        .runtime
        .select_mode(req.mode)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(SubmitResponse { accepted: true }))
}

// ============================================================
// Demo Submissions
// ============================================================

async fn submit_intel(
    State(state): State<AppState>,
    Json(req): Json<IntelRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit(&state, DemoMode::Intelligence, req.query).await
}

async fn submit_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit(&state, DemoMode::Analysis, req.payload).await
}

async fn submit(
    state: &AppState,
    mode: DemoMode,
    input: String,
) -> Result<Json<SubmitResponse>, AppError> {
    match state.runtime.submit(mode, input).await {
        Ok(()) => Ok(Json(SubmitResponse { accepted: true })),
        // Duplicate submissions while in flight and blank analysis payloads
        // are dropped silently, not queued and not errors.
        Err(TransitionError::Busy | TransitionError::EmptyInput) => {
            Ok(Json(SubmitResponse { accepted: false }))
        }
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("vanguard ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal(message) = self;
        let body = Json(ErrorResponse::new(message));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
