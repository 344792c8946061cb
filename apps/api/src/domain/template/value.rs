use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar supplied for a placeholder
///
/// Deserialized untagged from JSON: `null`, booleans, numbers and strings.
/// Arrays and objects are not placeholder values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceholderValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Placeholder key to supplied value
pub type ValueBag = BTreeMap<String, PlaceholderValue>;

impl PlaceholderValue {
    /// Emptiness rule shared by rendering, merging and suggestions
    ///
    /// Only `null` and `""` are empty. `0` and `false` are real values.
    ///
    /// # Example
    /// ```
    /// use promptdeck_api::domain::template::PlaceholderValue;
    ///
    /// assert!(PlaceholderValue::Null.is_empty());
    /// assert!(PlaceholderValue::Text(String::new()).is_empty());
    /// assert!(!PlaceholderValue::Number(0.0).is_empty());
    /// assert!(!PlaceholderValue::Bool(false).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        match self {
            PlaceholderValue::Null => true,
            PlaceholderValue::Text(text) => text.is_empty(),
            PlaceholderValue::Bool(_) | PlaceholderValue::Number(_) => false,
        }
    }

    /// Converts a JSON scalar; `None` for arrays and objects
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(PlaceholderValue::Null),
            serde_json::Value::Bool(b) => Some(PlaceholderValue::Bool(b)),
            serde_json::Value::Number(n) => n.as_f64().map(PlaceholderValue::Number),
            serde_json::Value::String(s) => Some(PlaceholderValue::Text(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

/// True when `value` is present and not empty
pub fn is_filled(value: Option<&PlaceholderValue>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl fmt::Display for PlaceholderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderValue::Null => Ok(()),
            PlaceholderValue::Bool(b) => write!(f, "{}", b),
            // f64's Display already prints 3.0 as "3" and 2.5 as "2.5"
            PlaceholderValue::Number(n) => write!(f, "{}", n),
            PlaceholderValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PlaceholderValue {
    fn from(value: &str) -> Self {
        PlaceholderValue::Text(value.to_string())
    }
}

impl From<String> for PlaceholderValue {
    fn from(value: String) -> Self {
        PlaceholderValue::Text(value)
    }
}

impl From<f64> for PlaceholderValue {
    fn from(value: f64) -> Self {
        PlaceholderValue::Number(value)
    }
}

impl From<i64> for PlaceholderValue {
    fn from(value: i64) -> Self {
        PlaceholderValue::Number(value as f64)
    }
}

impl From<bool> for PlaceholderValue {
    fn from(value: bool) -> Self {
        PlaceholderValue::Bool(value)
    }
}
