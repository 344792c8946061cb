use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::errors::{SuggestionError, SuggestionResult};
use super::provider::SuggestionProvider;
use super::types::{SuggestionRequest, Suggestions};

/// First-success-wins composition of providers
///
/// Providers are tried in order. A failure is logged and the next provider is
/// asked; the reasoning of a later success notes what failed before it.
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn SuggestionProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider to the end of the chain
    pub fn with(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[async_trait]
impl SuggestionProvider for ProviderChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn suggest(&self, request: &SuggestionRequest<'_>) -> SuggestionResult<Suggestions> {
        let mut failures: Vec<String> = Vec::new();
        let mut last_error = None;

        for provider in &self.providers {
            match provider.suggest(request).await {
                Ok(mut suggestions) => {
                    debug!(
                        provider = provider.name(),
                        template = request.template.id(),
                        count = suggestions.values.len(),
                        "Suggestions produced"
                    );
                    if !failures.is_empty() {
                        suggestions.reasoning =
                            format!("{} (after {})", suggestions.reasoning, failures.join("; "));
                    }
                    return Ok(suggestions);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        template = request.template.id(),
                        error = %e,
                        "Suggestion provider failed, falling back"
                    );
                    failures.push(format!("{} failed: {}", provider.name(), e));
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SuggestionError::NoProvider))
    }
}
