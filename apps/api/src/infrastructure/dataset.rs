use std::path::Path;
use tracing::info;

use crate::domain::errors::{LibraryError, LibraryResult};
use crate::domain::library::TemplateLibrary;

/// Reads and validates the template dataset at `path`
///
/// # Errors
/// `Io` when the file cannot be read; any load error from
/// [`TemplateLibrary::from_json_str`] otherwise
pub fn load_library_from_path(path: &Path) -> LibraryResult<TemplateLibrary> {
    let json = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let library = TemplateLibrary::from_json_str(&json)?;
    info!(
        path = %path.display(),
        "Loaded {} templates across {} categories",
        library.template_count(),
        library.category_count()
    );
    Ok(library)
}
