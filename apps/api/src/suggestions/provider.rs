use async_trait::async_trait;

use super::errors::SuggestionResult;
use super::types::{SuggestionRequest, Suggestions};

/// Source of proposed placeholder values
///
/// Implementations must not mutate anything they are handed; merging the
/// proposal into the user's values is the caller's job (see
/// [`merge_suggestions`](super::merge::merge_suggestions)).
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Proposes values for the placeholders covered by `request`
    async fn suggest(&self, request: &SuggestionRequest<'_>) -> SuggestionResult<Suggestions>;
}
