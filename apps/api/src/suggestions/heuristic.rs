//! Rule-based suggestions that need no external service.

use async_trait::async_trait;

use super::errors::SuggestionResult;
use super::provider::SuggestionProvider;
use super::types::{SuggestionRequest, Suggestions};
use crate::domain::template::{is_filled, Placeholder, PlaceholderType, PlaceholderValue, Template, ValueBag};

/// Fills placeholders from examples, defaults and type-based fallbacks
///
/// Never fails, so it is the natural last link of a
/// [`ProviderChain`](super::chain::ProviderChain).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicProvider;

impl HeuristicProvider {
    pub fn new() -> Self {
        Self
    }

    /// Computes the proposal synchronously
    ///
    /// Unscoped requests skip slots the user already filled; a scoped request
    /// always proposes a value for its target.
    pub fn suggest_values(request: &SuggestionRequest<'_>) -> ValueBag {
        request
            .template
            .placeholders()
            .iter()
            .filter(|p| request.covers(p.key.as_str()))
            .filter(|p| {
                request.target_key.is_some() || !is_filled(request.values.get(p.key.as_str()))
            })
            .map(|p| (p.key.to_string(), Self::pick(request.template, p)))
            .collect()
    }

    fn pick(template: &Template, placeholder: &Placeholder) -> PlaceholderValue {
        let example = template
            .first_example()
            .and_then(|e| e.placeholder_values.get(placeholder.key.as_str()))
            .filter(|v| **v != PlaceholderValue::Null);
        if let Some(value) = example {
            return value.clone();
        }

        match (placeholder.placeholder_type, &placeholder.default) {
            (PlaceholderType::Enum, default) => placeholder
                .enum_options
                .first()
                .map(|option| PlaceholderValue::Text(option.clone()))
                .or_else(|| default.clone())
                .unwrap_or_else(|| PlaceholderValue::Text(placeholder.label.clone())),
            (_, Some(default)) => default.clone(),
            (PlaceholderType::Number, None) => PlaceholderValue::Number(
                placeholder
                    .constraints
                    .and_then(|c| c.min)
                    .unwrap_or(1.0),
            ),
            (PlaceholderType::Boolean, None) => PlaceholderValue::Bool(false),
            (PlaceholderType::String | PlaceholderType::Textarea, None) => {
                PlaceholderValue::Text(placeholder.hint.clone())
            }
        }
    }
}

#[async_trait]
impl SuggestionProvider for HeuristicProvider {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn suggest(&self, request: &SuggestionRequest<'_>) -> SuggestionResult<Suggestions> {
        Ok(Suggestions {
            values: Self::suggest_values(request),
            reasoning: "Rule-based fill from examples, defaults and placeholder types".to_string(),
        })
    }
}
