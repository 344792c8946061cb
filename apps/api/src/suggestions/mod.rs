// Placeholder suggestion subsystem
//
// Providers propose values for a template's placeholders. A chain tries
// them in order, and the merge contract folds the winning proposal into the
// user's values without clobbering what they typed.

pub mod chain;
pub mod errors;
pub mod heuristic;
pub mod merge;
pub mod prompts;
pub mod provider;
pub mod types;

// Re-export main types
pub use chain::ProviderChain;
pub use errors::{SuggestionError, SuggestionResult};
pub use heuristic::HeuristicProvider;
pub use merge::merge_suggestions;
pub use provider::SuggestionProvider;
pub use types::{SuggestionRequest, Suggestions};
