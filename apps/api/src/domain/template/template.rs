use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::marker;
use super::placeholder::Placeholder;
use super::render::{render, RenderResult};
use super::value::ValueBag;
use crate::domain::errors::{LibraryError, LibraryResult};

/// A worked example of placeholder values, shipped with the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub placeholder_values: ValueBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Display metadata carried through untouched by rendering
///
/// Unknown dataset fields (e.g. `controls`, `evaluation_rules`) land in
/// `extra` and are serialized back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateMetadata {
    pub short_description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub example_inputs: Vec<ExampleInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_for_author: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Template aggregate root
///
/// A prompt body with named `{{ key }}` holes and the description of each
/// hole. Built once when the library loads and never mutated afterwards.
///
/// # Invariants
/// - `id`, `name` and `prompt_template` are non-empty
/// - Placeholder keys are unique
/// - Every placeholder key is referenced by at least one marker in the body
///
/// # Example
/// ```
/// use promptdeck_api::domain::template::{Placeholder, PlaceholderType, Template};
///
/// let template = Template::new(
///     "explain",
///     "Explain",
///     "Explain {{topic}}",
///     vec![Placeholder::new("topic", PlaceholderType::String).expect("valid key")],
/// )
/// .expect("valid template");
///
/// assert_eq!(template.id(), "explain");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    id: String,
    name: String,
    category_id: String,
    prompt_template: String,
    placeholders: Vec<Placeholder>,
    #[serde(flatten)]
    metadata: TemplateMetadata,
}

/// Checks that `id`, `name` and `prompt_template` are present
pub(crate) fn require_core_fields(id: &str, name: &str, prompt_template: &str) -> LibraryResult<()> {
    let missing = if id.is_empty() {
        "id"
    } else if name.is_empty() {
        "name"
    } else if prompt_template.is_empty() {
        "prompt_template"
    } else {
        return Ok(());
    };

    let owner = if id.is_empty() {
        "Template <unknown>".to_string()
    } else {
        format!("Template {}", id)
    };
    Err(LibraryError::MissingField {
        owner,
        field: missing,
    })
}

impl Template {
    /// Creates a new Template aggregate
    ///
    /// # Returns
    /// * `Ok(Template)` - If every structural invariant holds
    /// * `Err(LibraryError)` - `MissingField`, `DuplicatePlaceholderKey` or
    ///   `UnboundPlaceholder`
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prompt_template: impl Into<String>,
        placeholders: Vec<Placeholder>,
    ) -> LibraryResult<Self> {
        let id = id.into();
        let name = name.into();
        let prompt_template = prompt_template.into();

        require_core_fields(&id, &name, &prompt_template)?;

        let mut seen = HashSet::new();
        for placeholder in &placeholders {
            if !seen.insert(placeholder.key.as_str()) {
                return Err(LibraryError::DuplicatePlaceholderKey {
                    template_id: id,
                    key: placeholder.key.to_string(),
                });
            }
        }

        let referenced: HashSet<&str> = marker::referenced_keys(&prompt_template)
            .into_iter()
            .collect();
        let unbound: Vec<String> = placeholders
            .iter()
            .filter(|p| !referenced.contains(p.key.as_str()))
            .map(|p| p.key.to_string())
            .collect();
        if !unbound.is_empty() {
            return Err(LibraryError::UnboundPlaceholder {
                template_id: id,
                keys: unbound,
            });
        }

        Ok(Self {
            id,
            name,
            category_id: String::new(),
            prompt_template,
            placeholders,
            metadata: TemplateMetadata::default(),
        })
    }

    /// Attaches the template to its owning category
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = category_id.into();
        self
    }

    pub fn with_metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Renders the body against `values`; see [`render`]
    pub fn render(&self, values: &ValueBag) -> RenderResult {
        render(self, values)
    }

    /// Looks up a declared placeholder by key
    pub fn placeholder(&self, key: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.key.as_str() == key)
    }

    // Getters

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    pub fn short_description(&self) -> &str {
        &self.metadata.short_description
    }

    pub fn tags(&self) -> &[String] {
        &self.metadata.tags
    }

    /// First example input, used as a suggestion source
    pub fn first_example(&self) -> Option<&ExampleInput> {
        self.metadata.example_inputs.first()
    }
}
