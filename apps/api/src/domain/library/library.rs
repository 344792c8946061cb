use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::dataset::RawDataset;
use crate::domain::errors::{IdScope, LibraryError, LibraryResult};
use crate::domain::template::Template;

/// A named group of templates
///
/// Categories own their templates; a template belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    templates: Vec<Template>,
}

impl Category {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}

/// The validated, read-only template catalog
///
/// Built once at startup by [`load`](Self::load). Either every template in
/// the dataset passes validation or no library exists at all.
///
/// # Invariants
/// - Category ids are unique
/// - Template ids are unique across the whole library
/// - Every template satisfies [`Template`]'s own invariants
///
/// # Example
/// ```
/// use promptdeck_api::domain::library::TemplateLibrary;
///
/// let library = TemplateLibrary::from_json_str(r#"{
///     "categories": [{
///         "id": "writing",
///         "name": "Writing",
///         "templates": [{
///             "id": "explain",
///             "name": "Explain",
///             "prompt_template": "Explain {{topic}}",
///             "placeholders": [{"key": "topic", "type": "string", "required": true}]
///         }]
///     }]
/// }"#).expect("valid dataset");
///
/// assert!(library.get_by_id("explain").is_some());
/// assert!(library.get_by_id("missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    version: Option<String>,
    categories: Vec<Category>,
    /// template id -> (category index, template index)
    index: HashMap<String, (usize, usize)>,
}

impl TemplateLibrary {
    /// Validates a parsed dataset and builds the library
    ///
    /// # Errors
    /// - `DuplicateId` when two categories or two templates share an id
    /// - `MissingField` when a category lacks an id or a template lacks
    ///   id, name or prompt_template
    /// - `InvalidPlaceholderKey`, `DuplicatePlaceholderKey`,
    ///   `UnboundPlaceholder` for broken placeholder declarations
    pub fn load(raw: RawDataset) -> LibraryResult<Self> {
        let mut category_ids = HashSet::new();
        for category in &raw.categories {
            let id = category.id.as_deref().unwrap_or_default();
            if id.is_empty() {
                return Err(LibraryError::MissingField {
                    owner: "Category <unknown>".to_string(),
                    field: "id",
                });
            }
            if !category_ids.insert(id) {
                return Err(LibraryError::DuplicateId {
                    scope: IdScope::Category,
                    id: id.to_string(),
                });
            }
        }

        let mut categories = Vec::with_capacity(raw.categories.len());
        let mut index = HashMap::new();

        for (category_idx, raw_category) in raw.categories.into_iter().enumerate() {
            let category_id = raw_category.id.unwrap_or_default();
            let mut templates = Vec::with_capacity(raw_category.templates.len());

            for raw_template in raw_category.templates {
                let template = raw_template.into_template(&category_id)?;
                if index.contains_key(template.id()) {
                    return Err(LibraryError::DuplicateId {
                        scope: IdScope::Template,
                        id: template.id().to_string(),
                    });
                }
                index.insert(template.id().to_string(), (category_idx, templates.len()));
                templates.push(template);
            }

            debug!(
                category = %category_id,
                templates = templates.len(),
                "Category validated"
            );

            categories.push(Category {
                id: category_id,
                name: raw_category.name.unwrap_or_default(),
                description: raw_category.description,
                templates,
            });
        }

        Ok(Self {
            version: raw.version,
            categories,
            index,
        })
    }

    /// Parses and validates a JSON dataset
    pub fn from_json_str(json: &str) -> LibraryResult<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::load(raw)
    }

    /// Looks up a template by id in O(1)
    pub fn get_by_id(&self, id: &str) -> Option<&Template> {
        self.index
            .get(id)
            .map(|&(category, template)| &self.categories[category].templates[template])
    }

    /// Templates of one category, `None` if the category does not exist
    pub fn list_by_category(&self, category_id: &str) -> Option<&[Template]> {
        self.category(category_id).map(Category::templates)
    }

    /// All templates, in dataset order
    pub fn list_all(&self) -> impl Iterator<Item = &Template> {
        self.categories.iter().flat_map(|c| c.templates.iter())
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn template_count(&self) -> usize {
        self.index.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}
