// Template library module
// Loads the raw dataset, enforces catalog-wide invariants and serves lookups

#![allow(clippy::module_inception)]

pub mod dataset;
pub mod library;

// Re-export main types for convenience
pub use dataset::RawDataset;
pub use library::{Category, TemplateLibrary};
