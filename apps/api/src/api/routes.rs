use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{system, templates};
use super::state::AppState;

/// Builds the application router
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(system::health_check))
        .route("/api/config", get(system::get_config))
        // Template catalog
        .route("/api/templates", get(templates::list_templates))
        .route("/api/templates/categories", get(templates::list_categories))
        .route("/api/templates/:id", get(templates::get_template))
        .route("/api/templates/:id/render", post(templates::render_template))
        .route("/api/templates/:id/ai-fill", post(templates::ai_fill))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
