use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::suggestions::SuggestionError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Creates a 502 Bad Gateway error for upstream provider failures
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<SuggestionError> for ApiError {
    fn from(err: SuggestionError) -> Self {
        match err {
            SuggestionError::UnknownPlaceholder(_) => Self::bad_request(err.to_string()),
            SuggestionError::LlmError(_)
            | SuggestionError::EmptyResponse
            | SuggestionError::JsonError(_) => {
                Self::bad_gateway(format!("Failed to generate suggestions: {}", err))
            }
            SuggestionError::NoProvider | SuggestionError::ConfigError(_) => {
                Self::internal_server_error(err.to_string())
            }
        }
    }
}
