//! Core model shared by every platform: catalog, path, view

pub mod catalog;
pub mod path;
pub mod routes;
pub mod view;

pub use catalog::{SchemaCatalog, SchemaVersion};
pub use path::{FieldPath, Path};
pub use view::{
    description_lines, ChildSummary, DescriptionLine, ExampleDocument, FieldRow, GroupVersionKind,
    ResolvedNode, ResolvedView, ResourceEntry, ResourceListing, Snapshot, TypeDisplay,
};
