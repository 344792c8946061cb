use thiserror::Error;

/// Errors that can occur while gathering placeholder suggestions
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("LLM API error: {0}")]
    LlmError(String),

    #[error("No content in LLM response")]
    EmptyResponse,

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown placeholder: {0}")]
    UnknownPlaceholder(String),

    #[error("No suggestion provider configured")]
    NoProvider,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type SuggestionResult<T> = Result<T, SuggestionError>;
