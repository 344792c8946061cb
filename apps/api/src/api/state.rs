use serde::Serialize;
use std::sync::Arc;

use crate::config::AiConfig;
use crate::domain::library::TemplateLibrary;
use crate::suggestions::SuggestionProvider;

/// Public description of the AI provider, safe to expose to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiStatus {
    pub configured: bool,
    pub base_url: String,
    pub model: String,
}

impl From<&AiConfig> for AiStatus {
    fn from(config: &AiConfig) -> Self {
        Self {
            configured: config.is_configured(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }
}

/// Shared handler state
///
/// The library is immutable after startup, so it is shared without locking.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<TemplateLibrary>,
    pub suggester: Arc<dyn SuggestionProvider>,
    pub ai: AiStatus,
}

impl AppState {
    pub fn new(
        library: TemplateLibrary,
        suggester: Arc<dyn SuggestionProvider>,
        ai: AiStatus,
    ) -> Self {
        Self {
            library: Arc::new(library),
            suggester,
            ai,
        }
    }
}
