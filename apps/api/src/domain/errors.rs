use std::path::PathBuf;

use thiserror::Error;

/// Which id namespace a duplicate was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    Category,
    Template,
}

impl std::fmt::Display for IdScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdScope::Category => write!(f, "category"),
            IdScope::Template => write!(f, "template"),
        }
    }
}

/// Errors that abort loading of the template library
///
/// Any of these is fatal: a library is either fully valid or not built.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Duplicate {scope} id: {id}")]
    DuplicateId { scope: IdScope, id: String },

    #[error("{owner} is missing required field `{field}`")]
    MissingField { owner: String, field: &'static str },

    #[error("Template {template_id} declares placeholder `{key}` more than once")]
    DuplicatePlaceholderKey { template_id: String, key: String },

    #[error("Template {template_id} never references placeholder(s): {}", .keys.join(", "))]
    UnboundPlaceholder {
        template_id: String,
        keys: Vec<String>,
    },

    #[error("Template {template_id}: {reason}")]
    InvalidPlaceholderKey { template_id: String, reason: String },

    #[error("Failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type LibraryResult<T> = Result<T, LibraryError>;
