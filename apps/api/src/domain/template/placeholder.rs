use serde::Serialize;

use super::value::{PlaceholderValue, ValueBag};
use super::value_objects::{Constraints, PlaceholderKey, PlaceholderType};

/// One fillable slot of a template
///
/// Rendering only looks at `key`, `placeholder_type`, `required`, `default`
/// and `constraints`. The remaining fields feed the suggestion providers and
/// the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub key: PlaceholderKey,
    pub label: String,
    #[serde(rename = "type")]
    pub placeholder_type: PlaceholderType,
    pub required: bool,
    pub hint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<PlaceholderValue>,
    pub ai_fill: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

impl Placeholder {
    /// Creates an optional placeholder with no default and no constraints
    ///
    /// # Example
    /// ```
    /// use promptdeck_api::domain::template::{Placeholder, PlaceholderType};
    ///
    /// let p = Placeholder::new("topic", PlaceholderType::String)
    ///     .expect("valid key")
    ///     .required();
    /// assert!(p.required);
    /// ```
    pub fn new(key: impl Into<String>, placeholder_type: PlaceholderType) -> Result<Self, String> {
        let key = PlaceholderKey::new(key)?;
        Ok(Self {
            label: key.as_str().to_string(),
            key,
            placeholder_type,
            required: false,
            hint: String::new(),
            default: None,
            ai_fill: false,
            enum_options: Vec::new(),
            constraints: None,
        })
    }

    /// Marks the placeholder as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the fallback used when no value is supplied
    pub fn with_default(mut self, default: impl Into<PlaceholderValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_enum_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// The value used for substitution, if any
    ///
    /// Supplied value when filled, else the default when filled, else `None`.
    pub fn effective_value<'a>(&'a self, values: &'a ValueBag) -> Option<&'a PlaceholderValue> {
        values
            .get(self.key.as_str())
            .filter(|v| !v.is_empty())
            .or_else(|| self.default.as_ref().filter(|v| !v.is_empty()))
    }

    /// Applies clamping/truncation to a resolved value
    ///
    /// A `number` placeholder with bounds coerces numeric text before
    /// clamping. Values of other kinds pass through untouched.
    pub fn enforce_constraints(&self, value: &PlaceholderValue) -> PlaceholderValue {
        let Some(constraints) = self.constraints else {
            return value.clone();
        };

        match value {
            PlaceholderValue::Number(n) => PlaceholderValue::Number(constraints.clamp(*n)),
            PlaceholderValue::Text(text) => {
                if self.placeholder_type == PlaceholderType::Number && constraints.has_bounds() {
                    if let Some(n) = text.trim().parse::<f64>().ok().filter(|n| n.is_finite()) {
                        return PlaceholderValue::Number(constraints.clamp(n));
                    }
                }
                PlaceholderValue::Text(constraints.truncate(text))
            }
            other => other.clone(),
        }
    }
}
