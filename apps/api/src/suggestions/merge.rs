//! Fill-only-if-empty merge of suggested values into user values.

use crate::domain::template::{is_filled, Template, ValueBag};

/// Merges `suggested` into a copy of `current`
///
/// - Unscoped (`target_key == None`): a suggestion lands only in a slot that
///   is absent, `null` or `""`. User-entered data is never overwritten.
/// - Scoped: only the target key is merged, and it is always overwritten.
/// - Keys that are not placeholders of `template` are dropped.
///
/// # Example
/// ```
/// use promptdeck_api::domain::template::{Placeholder, PlaceholderType, PlaceholderValue, Template, ValueBag};
/// use promptdeck_api::suggestions::merge_suggestions;
///
/// let template = Template::new(
///     "t",
///     "T",
///     "{{a}} {{b}}",
///     vec![
///         Placeholder::new("a", PlaceholderType::String).unwrap(),
///         Placeholder::new("b", PlaceholderType::String).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// let mut current = ValueBag::new();
/// current.insert("a".into(), "mine".into());
/// let mut suggested = ValueBag::new();
/// suggested.insert("a".into(), "theirs".into());
/// suggested.insert("b".into(), "filled".into());
///
/// let merged = merge_suggestions(&template, &current, &suggested, None);
/// assert_eq!(merged["a"], PlaceholderValue::from("mine"));
/// assert_eq!(merged["b"], PlaceholderValue::from("filled"));
/// ```
pub fn merge_suggestions(
    template: &Template,
    current: &ValueBag,
    suggested: &ValueBag,
    target_key: Option<&str>,
) -> ValueBag {
    let mut merged = current.clone();

    for (key, value) in suggested {
        if template.placeholder(key).is_none() {
            continue;
        }
        let apply = match target_key {
            Some(target) => key == target,
            None => !is_filled(merged.get(key)),
        };
        if apply {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}
