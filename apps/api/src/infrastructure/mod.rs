// Infrastructure layer module
// Contains the on-disk dataset adapter and external service integrations
// Follows Hexagonal Architecture

pub mod dataset;
pub mod openai;

pub use dataset::load_library_from_path;
pub use openai::OpenAiSuggestionProvider;
