//! Raw dataset shape, as read from `templates.json`.
//!
//! These types only describe JSON; nothing here is validated. They are turned
//! into domain aggregates by [`TemplateLibrary::load`](super::TemplateLibrary::load).

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::errors::{LibraryError, LibraryResult};
use crate::domain::template::template::require_core_fields;
use crate::domain::template::{
    Constraints, ExampleInput, Placeholder, PlaceholderKey, PlaceholderType, PlaceholderValue,
    Template, TemplateMetadata,
};

#[derive(Debug, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub version: Option<String>,
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub templates: Vec<RawTemplate>,
}

#[derive(Debug, Deserialize)]
pub struct RawTemplate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "promptTemplate")]
    pub prompt_template: Option<String>,
    #[serde(default)]
    pub short_description: String,
    /// Ignored: a template always belongs to the category that lists it
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub placeholders: Vec<RawPlaceholder>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub example_inputs: Vec<ExampleInput>,
    #[serde(default)]
    pub model_hint: Option<String>,
    #[serde(default)]
    pub notes_for_author: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawPlaceholder {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub placeholder_type: PlaceholderType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub default: Option<PlaceholderValue>,
    #[serde(default)]
    pub ai_fill: bool,
    #[serde(default, alias = "enumOptions")]
    pub enum_options: Vec<String>,
    #[serde(default)]
    pub constraints: Option<Constraints>,
}

impl RawPlaceholder {
    fn into_placeholder(self, template_id: &str) -> LibraryResult<Placeholder> {
        let key = PlaceholderKey::new(self.key).map_err(|reason| {
            LibraryError::InvalidPlaceholderKey {
                template_id: template_id.to_string(),
                reason,
            }
        })?;
        let label = if self.label.is_empty() {
            key.as_str().to_string()
        } else {
            self.label
        };

        Ok(Placeholder {
            key,
            label,
            placeholder_type: self.placeholder_type,
            required: self.required,
            hint: self.hint,
            default: self.default,
            ai_fill: self.ai_fill,
            enum_options: self.enum_options,
            constraints: self.constraints,
        })
    }
}

impl RawTemplate {
    /// Validates and converts into a [`Template`] owned by `category_id`
    pub fn into_template(self, category_id: &str) -> LibraryResult<Template> {
        let id = self.id.unwrap_or_default();
        let name = self.name.unwrap_or_default();
        let prompt_template = self.prompt_template.unwrap_or_default();
        require_core_fields(&id, &name, &prompt_template)?;

        let placeholders = self
            .placeholders
            .into_iter()
            .map(|p| p.into_placeholder(&id))
            .collect::<LibraryResult<Vec<_>>>()?;

        let metadata = TemplateMetadata {
            short_description: self.short_description,
            tags: self.tags,
            example_inputs: self.example_inputs,
            model_hint: self.model_hint,
            notes_for_author: self.notes_for_author,
            extra: self.extra,
        };

        Ok(Template::new(id, name, prompt_template, placeholders)?
            .with_category(category_id)
            .with_metadata(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_template(json: serde_json::Value) -> RawTemplate {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn parses_original_field_names() {
        let raw = raw_template(serde_json::json!({
            "id": "t1",
            "name": "Title",
            "prompt_template": "Write {{count}} titles about {{topic}}",
            "placeholders": [
                {"key": "count", "type": "number", "required": true, "default": 5,
                 "constraints": {"min": 1, "max": 10}},
                {"key": "topic", "label": "Topic", "type": "string", "ai_fill": true,
                 "constraints": {"maxLength": 80}}
            ],
            "evaluation_rules": {"auto_checks": ["length"]}
        }));
        let template = raw.into_template("writing").unwrap();

        assert_eq!(template.category_id(), "writing");
        let count = template.placeholder("count").unwrap();
        assert_eq!(count.default, Some(PlaceholderValue::Number(5.0)));
        assert_eq!(count.label, "count");
        let topic = template.placeholder("topic").unwrap();
        assert!(topic.ai_fill);
        assert_eq!(topic.constraints.unwrap().max_length, Some(80));
        assert!(template.metadata().extra.contains_key("evaluation_rules"));
    }

    #[test]
    fn accepts_camel_case_aliases() {
        let raw = raw_template(serde_json::json!({
            "id": "t1",
            "name": "Tone",
            "promptTemplate": "Use a {{tone}} tone",
            "placeholders": [
                {"key": "tone", "type": "enum", "enumOptions": ["formal", "casual"]}
            ]
        }));
        let template = raw.into_template("c").unwrap();
        assert_eq!(
            template.placeholder("tone").unwrap().enum_options,
            vec!["formal", "casual"]
        );
    }

    #[test]
    fn null_default_means_no_default() {
        let raw = raw_template(serde_json::json!({
            "id": "t1", "name": "N", "prompt_template": "{{a}}",
            "placeholders": [{"key": "a", "type": "string", "default": null}]
        }));
        let template = raw.into_template("c").unwrap();
        assert_eq!(template.placeholder("a").unwrap().default, None);
    }

    #[test]
    fn missing_core_field_is_reported_before_key_problems() {
        let raw = raw_template(serde_json::json!({
            "name": "N", "prompt_template": "{{a}}",
            "placeholders": [{"key": "bad key", "type": "string"}]
        }));
        let err = raw.into_template("c").unwrap_err();
        assert!(matches!(err, LibraryError::MissingField { field: "id", .. }));
    }

    #[test]
    fn invalid_key_is_rejected() {
        let raw = raw_template(serde_json::json!({
            "id": "t1", "name": "N", "prompt_template": "{{a.b}}",
            "placeholders": [{"key": "a.b", "type": "string"}]
        }));
        let err = raw.into_template("c").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidPlaceholderKey { .. }));
    }

    #[test]
    fn unknown_placeholder_type_fails_to_parse() {
        let result: Result<RawTemplate, _> = serde_json::from_value(serde_json::json!({
            "id": "t1", "name": "N", "prompt_template": "{{a}}",
            "placeholders": [{"key": "a", "type": "color"}]
        }));
        assert!(result.is_err());
    }
}
