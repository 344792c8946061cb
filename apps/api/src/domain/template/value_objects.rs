use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder key value object
///
/// # Invariants
/// - Must not be empty
/// - Only ASCII letters, digits and underscore
/// - Is immutable after construction
///
/// Keys are matched case-sensitively against `{{ key }}` markers, so the
/// character restriction keeps marker scanning unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaceholderKey(String);

impl PlaceholderKey {
    /// Creates a new PlaceholderKey value object
    ///
    /// # Returns
    /// * `Ok(PlaceholderKey)` - If the key is well formed
    /// * `Err(String)` - If the key is empty or contains other characters
    ///
    /// # Example
    /// ```
    /// use promptdeck_api::domain::template::value_objects::PlaceholderKey;
    ///
    /// let key = PlaceholderKey::new("topic").expect("valid key");
    /// assert_eq!(key.as_str(), "topic");
    /// assert!(PlaceholderKey::new("my-key").is_err());
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if Self::is_valid(&key) {
            Ok(PlaceholderKey(key))
        } else {
            Err(format!("Invalid placeholder key: {:?}", key))
        }
    }

    /// Checks the key grammar: `[A-Za-z0-9_]+`
    pub fn is_valid(key: &str) -> bool {
        !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PlaceholderKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Kind of input a placeholder expects
///
/// The type drives constraint semantics and suggestion heuristics. Every
/// kind renders through its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderType {
    /// Single-line text
    String,
    /// Multi-line text
    Textarea,
    /// Numeric input
    Number,
    /// One of `enum_options`
    Enum,
    /// Yes/no toggle
    Boolean,
}

impl fmt::Display for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderType::String => write!(f, "string"),
            PlaceholderType::Textarea => write!(f, "textarea"),
            PlaceholderType::Number => write!(f, "number"),
            PlaceholderType::Enum => write!(f, "enum"),
            PlaceholderType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Bounds applied to the value actually substituted
///
/// Numbers are clamped into `[min, max]`; strings are cut to `max_length`
/// characters. Nothing is ever rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(
        default,
        rename = "maxLength",
        alias = "max_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<usize>,
}

impl Constraints {
    /// True when a numeric bound is declared
    pub fn has_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Clamps a number: `min` first, then `max`
    pub fn clamp(&self, value: f64) -> f64 {
        let mut clamped = value;
        if let Some(min) = self.min {
            clamped = clamped.max(min);
        }
        if let Some(max) = self.max {
            clamped = clamped.min(max);
        }
        clamped
    }

    /// Keeps at most `max_length` characters of `value`
    pub fn truncate(&self, value: &str) -> String {
        match self.max_length {
            Some(limit) => value.chars().take(limit).collect(),
            None => value.to_string(),
        }
    }
}
