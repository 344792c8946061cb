//! Single-pass scanner for `{{ key }}` markers.
//!
//! A marker is `{{`, optional whitespace, a key made of `[A-Za-z0-9_]`,
//! optional whitespace, then `}}`. Anything else between braces is plain
//! text. Matching is anchored on the whole key, so `{{name}}` never matches
//! inside `{{namefull}}`.

use super::value_objects::PlaceholderKey;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of a template body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text between markers
    Text(&'a str),
    /// A marker; `raw` is its exact source form, `key` the trimmed name
    Marker { raw: &'a str, key: &'a str },
}

/// Iterator over the segments of a template body
pub struct Segments<'a> {
    body: &'a str,
    pos: usize,
}

/// Splits `body` into text and marker segments, in order
pub fn segments(body: &str) -> Segments<'_> {
    Segments { body, pos: 0 }
}

/// Finds the first marker in `rest`: (start, end, key) as byte offsets
fn find_marker(rest: &str) -> Option<(usize, usize, &str)> {
    let mut from = 0;
    while let Some(open) = rest[from..].find(OPEN).map(|i| i + from) {
        let inner_start = open + OPEN.len();
        // No closing delimiter anywhere after this point means no marker at all
        let close = rest[inner_start..].find(CLOSE)? + inner_start;
        let key = rest[inner_start..close].trim_matches(char::is_whitespace);
        if PlaceholderKey::is_valid(key) {
            return Some((open, close + CLOSE.len(), key));
        }
        // "{" is one byte, so open + 1 stays on a char boundary
        from = open + 1;
    }
    None
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.body.len() {
            return None;
        }
        let rest = &self.body[self.pos..];
        match find_marker(rest) {
            Some((0, end, key)) => {
                self.pos += end;
                Some(Segment::Marker {
                    raw: &rest[..end],
                    key,
                })
            }
            Some((start, _, _)) => {
                self.pos += start;
                Some(Segment::Text(&rest[..start]))
            }
            None => {
                self.pos = self.body.len();
                Some(Segment::Text(rest))
            }
        }
    }
}

/// Keys referenced by markers in `body`, in order of first appearance
pub fn referenced_keys(body: &str) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for segment in segments(body) {
        if let Segment::Marker { key, .. } = segment {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Replaces every marker whose key `resolve` knows; others stay verbatim
///
/// # Example
/// ```
/// use promptdeck_api::domain::template::marker::substitute;
///
/// let out = substitute("Hi {{ name }}, {{other}}", |key| (key == "name").then_some("Ada"));
/// assert_eq!(out, "Hi Ada, {{other}}");
/// ```
pub fn substitute<'r, F>(body: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<&'r str>,
{
    let mut out = String::with_capacity(body.len());
    for segment in segments(body) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Marker { raw, key } => out.push_str(resolve(key).unwrap_or(raw)),
        }
    }
    out
}
