use serde::Serialize;

use super::errors::{SuggestionError, SuggestionResult};
use crate::domain::template::{Template, ValueBag};

/// What a provider is asked to fill
#[derive(Debug, Clone, Copy)]
pub struct SuggestionRequest<'a> {
    pub template: &'a Template,
    /// Values the user has entered so far
    pub values: &'a ValueBag,
    /// When set, only this placeholder is suggested, and it is overwritten on merge
    pub target_key: Option<&'a str>,
}

impl<'a> SuggestionRequest<'a> {
    /// Request covering every placeholder of `template`
    pub fn new(template: &'a Template, values: &'a ValueBag) -> Self {
        Self {
            template,
            values,
            target_key: None,
        }
    }

    /// Scopes the request to one placeholder
    ///
    /// # Errors
    /// `UnknownPlaceholder` when `key` is not declared by the template
    pub fn with_target(mut self, key: &'a str) -> SuggestionResult<Self> {
        if self.template.placeholder(key).is_none() {
            return Err(SuggestionError::UnknownPlaceholder(key.to_string()));
        }
        self.target_key = Some(key);
        Ok(self)
    }

    /// Whether `key` is in scope for this request
    pub fn covers(&self, key: &str) -> bool {
        self.target_key.map_or(true, |target| target == key)
    }
}

/// A provider's proposal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions {
    pub values: ValueBag,
    /// Human-readable note on where the values came from
    pub reasoning: String,
}
