use std::net::SocketAddr;
use std::sync::Arc;

use promptdeck_api::api::{self, AiStatus, AppState};
use promptdeck_api::config::AppConfig;
use promptdeck_api::infrastructure::{load_library_from_path, OpenAiSuggestionProvider};
use promptdeck_api::suggestions::{HeuristicProvider, ProviderChain};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Load the template catalog; a bad dataset never reaches the listener
    tracing::info!("Loading templates from {}", config.templates_path.display());
    let library = match load_library_from_path(&config.templates_path) {
        Ok(library) => library,
        Err(e) => {
            tracing::error!("Failed to load template library: {}", e);
            std::process::exit(1);
        }
    };

    // External provider first, heuristic as the fallback that never fails
    let mut chain = ProviderChain::new();
    if config.ai.is_configured() {
        match OpenAiSuggestionProvider::new(&config.ai) {
            Ok(provider) => {
                tracing::info!("AI suggestions enabled with model {}", provider.model());
                chain = chain.with(Arc::new(provider));
            }
            Err(e) => tracing::warn!("AI provider disabled: {}", e),
        }
    }
    let chain = chain.with(Arc::new(HeuristicProvider::new()));
    tracing::debug!(?chain, "Suggestion providers ready");

    let state = AppState::new(library, Arc::new(chain), AiStatus::from(&config.ai));
    let app = api::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
