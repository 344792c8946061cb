use axum::{extract::State, Json};

use crate::api::state::{AiStatus, AppState};

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// AI provider status, without credentials
///
/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<AiStatus> {
    Json(state.ai)
}
