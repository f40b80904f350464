//! Asset descriptors for placeable content
//!
//! Actual geometry parsing and GPU upload belong to the rendering
//! collaborator; this module only carries the metadata the placement core
//! needs: which template is loaded, its default spawn scale, and which
//! material variant is currently selected.

mod template;

pub use template::{MaterialKind, PlaceableTemplate, TemplateError};
