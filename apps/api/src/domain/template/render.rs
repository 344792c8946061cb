//! Placeholder resolution and substitution.
//!
//! Rendering is a pure function of `(template, values)`. Each placeholder is
//! resolved on its own: supplied value, else default, else unresolved.
//! Resolved values are clamped/truncated and substituted for every marker
//! of their key; unresolved markers stay in the output verbatim so the user
//! can see what is left to fill.

use serde::Serialize;
use std::collections::HashMap;

use super::marker;
use super::template::Template;
use super::value::ValueBag;

/// Outcome of a render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub rendered_text: String,
    /// Required keys left unresolved, in declaration order
    pub missing_required: Vec<String>,
}

impl RenderResult {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Renders `template` with `values`
///
/// Never fails. Keys in `values` that match no placeholder are ignored.
///
/// # Example
/// ```
/// use promptdeck_api::domain::template::{render, Placeholder, PlaceholderType, Template, ValueBag};
///
/// let template = Template::new(
///     "explain",
///     "Explain",
///     "Explain {{topic}} to {{audience}}",
///     vec![
///         Placeholder::new("topic", PlaceholderType::String).unwrap().required(),
///         Placeholder::new("audience", PlaceholderType::String)
///             .unwrap()
///             .required()
///             .with_default("beginners"),
///     ],
/// )
/// .unwrap();
///
/// let result = render(&template, &ValueBag::new());
/// assert_eq!(result.rendered_text, "Explain {{topic}} to beginners");
/// assert_eq!(result.missing_required, vec!["topic".to_string()]);
/// ```
pub fn render(template: &Template, values: &ValueBag) -> RenderResult {
    let mut resolved: HashMap<&str, String> = HashMap::with_capacity(template.placeholders().len());
    let mut missing_required = Vec::new();

    for placeholder in template.placeholders() {
        match placeholder.effective_value(values) {
            Some(value) => {
                let display = placeholder.enforce_constraints(value).to_string();
                resolved.insert(placeholder.key.as_str(), display);
            }
            None if placeholder.required => missing_required.push(placeholder.key.to_string()),
            None => {}
        }
    }

    let rendered_text = marker::substitute(template.prompt_template(), |key| {
        resolved.get(key).map(String::as_str)
    });

    RenderResult {
        rendered_text,
        missing_required,
    }
}
