// Prompt templates for LLM-backed suggestions
//
// The fill prompt is itself a `{{ var }}` template, rendered with the same
// marker scanner as catalog templates. Prompts are versioned for
// reproducibility.

use serde::Serialize;
use std::collections::HashMap;

use super::types::SuggestionRequest;
use crate::domain::template::marker;
use crate::domain::template::{Constraints, PlaceholderType};

/// Prompt template structure
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub system: String,
    pub user_template: String,
}

impl PromptTemplate {
    /// Render the user template with variables
    ///
    /// Markers without a variable stay as written. Substituted text is not
    /// scanned again.
    pub fn render(&self, variables: &HashMap<String, String>) -> String {
        marker::substitute(&self.user_template, |key| {
            variables.get(key).map(String::as_str)
        })
    }
}

pub mod library {
    use super::PromptTemplate;

    pub fn placeholder_fill() -> PromptTemplate {
        PromptTemplate {
            name: "placeholder_fill".to_string(),
            version: "1.0.0".to_string(),
            system: "You are a helpful assistant that fills in template placeholders. \
                     Always respond with valid JSON only, no additional text."
                .to_string(),
            user_template: "You are helping to fill in a template for: \"{{template_name}}\"\n\
                            Description: {{description}}\n\n\
                            Template structure: {{template_body}}\n\n\
                            Placeholders to fill:\n{{placeholders}}\n\n\
                            User has already filled:\n{{user_values}}\n\n\
                            {{examples}}\
                            {{focus}}\n\n\
                            Rules:\n\
                            1. Return ONLY valid JSON with the structure: {\"suggested_values\": {\"field_key\": \"value\"}}\n\
                            2. Respect field types (string, number, boolean, enum)\n\
                            3. For enum fields, choose from the provided options only\n\
                            4. Follow constraints (min, max) for number fields\n\
                            5. Use hints and examples as guidance\n\
                            6. Keep values concise and relevant to the template purpose\n\
                            7. Answer in the language the template is written in\n\n\
                            Return your response now:"
                .to_string(),
        }
    }
}

/// Placeholder description sent to the model
#[derive(Serialize)]
struct PlaceholderBrief<'a> {
    key: &'a str,
    label: &'a str,
    #[serde(rename = "type")]
    placeholder_type: PlaceholderType,
    hint: &'a str,
    required: bool,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    enum_options: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    constraints: Option<Constraints>,
}

/// System and user messages for one fill request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPrompt {
    pub system: String,
    pub user: String,
}

/// Builds the chat messages asking a model to fill `request`
///
/// Only placeholders flagged `ai_fill` (and inside the request scope) are
/// offered to the model.
pub fn build_fill_prompt(request: &SuggestionRequest<'_>) -> serde_json::Result<FillPrompt> {
    let template = request.template;
    let prompt = library::placeholder_fill();

    let briefs: Vec<PlaceholderBrief<'_>> = template
        .placeholders()
        .iter()
        .filter(|p| request.covers(p.key.as_str()) && p.ai_fill)
        .map(|p| PlaceholderBrief {
            key: p.key.as_str(),
            label: &p.label,
            placeholder_type: p.placeholder_type,
            hint: &p.hint,
            required: p.required,
            enum_options: &p.enum_options,
            constraints: p.constraints,
        })
        .collect();

    let examples = match template.first_example() {
        Some(example) if !example.placeholder_values.is_empty() => format!(
            "Example values:\n{}\n\n",
            serde_json::to_string_pretty(&example.placeholder_values)?
        ),
        _ => String::new(),
    };

    let focus = match request.target_key {
        Some(key) => format!("Focus on filling ONLY the field: \"{}\"", key),
        None => "Fill in all missing required fields and suggest values for optional fields \
                 when appropriate."
            .to_string(),
    };

    let variables: HashMap<String, String> = [
        ("template_name", template.name().to_string()),
        ("description", template.short_description().to_string()),
        ("template_body", template.prompt_template().to_string()),
        ("placeholders", serde_json::to_string_pretty(&briefs)?),
        ("user_values", serde_json::to_string_pretty(request.values)?),
        ("examples", examples),
        ("focus", focus),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    Ok(FillPrompt {
        system: prompt.system.clone(),
        user: prompt.render(&variables),
    })
}
