//! OpenAI-compatible chat-completions suggestion provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::AiConfig;
use crate::domain::template::{PlaceholderValue, ValueBag};
use crate::suggestions::prompts::build_fill_prompt;
use crate::suggestions::{
    SuggestionError, SuggestionProvider, SuggestionRequest, SuggestionResult, Suggestions,
};

/// Asks a chat model to propose placeholder values
///
/// Built once at startup and shared; the HTTP client carries the request
/// timeout from [`AiConfig`].
pub struct OpenAiSuggestionProvider {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiSuggestionProvider {
    /// # Errors
    /// `ConfigError` when no API key is configured or the client cannot be built
    pub fn new(config: &AiConfig) -> SuggestionResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SuggestionError::ConfigError("OpenAI API key is required".to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SuggestionError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    async fn complete(&self, system: String, user: String) -> SuggestionResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                SuggestionError::LlmError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Chat completion error ({}): {}", status, detail);
            return Err(SuggestionError::LlmError(format!("HTTP {}", status)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SuggestionError::LlmError(format!("Malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(SuggestionError::EmptyResponse)
    }
}

#[async_trait]
impl SuggestionProvider for OpenAiSuggestionProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn suggest(&self, request: &SuggestionRequest<'_>) -> SuggestionResult<Suggestions> {
        let prompt = build_fill_prompt(request)?;
        debug!(
            model = %self.model,
            template = request.template.id(),
            target = ?request.target_key,
            "Requesting AI suggestions"
        );

        let content = self.complete(prompt.system, prompt.user).await?;
        let values = parse_suggested_values(&content, request)?;

        Ok(Suggestions {
            values,
            reasoning: format!("AI fill ({})", self.model),
        })
    }
}

/// Extracts `suggested_values` from the model's JSON answer
///
/// Keys outside the request scope or not declared by the template are
/// dropped, as are arrays and objects. A missing `suggested_values` object
/// yields an empty bag.
pub fn parse_suggested_values(
    content: &str,
    request: &SuggestionRequest<'_>,
) -> SuggestionResult<ValueBag> {
    let mut parsed: Value = serde_json::from_str(content.trim())?;

    let Some(Value::Object(suggested)) = parsed.get_mut("suggested_values").map(Value::take) else {
        return Ok(ValueBag::new());
    };

    Ok(suggested
        .into_iter()
        .filter(|(key, _)| request.covers(key) && request.template.placeholder(key).is_some())
        .filter_map(|(key, value)| PlaceholderValue::from_json(value).map(|v| (key, v)))
        .collect())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}
