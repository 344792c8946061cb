// Template domain module
// Contains the template aggregate root, its placeholders and the renderer

#![allow(clippy::module_inception)]

pub mod marker;
pub mod placeholder;
pub mod render;
pub mod template;
pub mod value;
pub mod value_objects;

// Re-export main types for convenience
pub use placeholder::Placeholder;
pub use render::{render, RenderResult};
pub use template::{ExampleInput, Template, TemplateMetadata};
pub use value::{is_filled, PlaceholderValue, ValueBag};
pub use value_objects::{Constraints, PlaceholderKey, PlaceholderType};
