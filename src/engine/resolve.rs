//! Resolution: one path in, one complete view out
//!
//! ```text
//! empty field path ──► resources ───────────────────────► Listing | Error
//!
//! field path ──┬──► node (pinned) ──┐
//!              ├──► example ────────┼──► reconcile ──────► Node | Error
//!              └──► versions ───────┘
//! ```
//!
//! The three node-side lookups run concurrently and complete in any order.
//! Example and version failures only drop that part of the view.

use crate::backend::SchemaBackend;
use crate::core::{
    description_lines, ChildSummary, DescriptionLine, FieldRow, Path, ResolvedNode, ResolvedView, ResourceListing,
    SchemaVersion, TypeDisplay,
};
use crate::error::LookupError;
use std::future::Future;
use std::rc::Rc;

#[derive(Clone)]
pub struct ResolutionEngine {
    backend: Rc<dyn SchemaBackend>,
}

impl ResolutionEngine {
    pub fn new(backend: Rc<dyn SchemaBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Rc<dyn SchemaBackend> {
        &self.backend
    }

    pub async fn resolve(&self, path: &Path) -> ResolvedView {
        let Some(version) = path.schema_version.as_ref() else {
            return ResolvedView::Listing { banner: Vec::new(), listing: ResourceListing::default() };
        };
        if path.is_listing() {
            self.resolve_listing(version).await
        } else {
            self.resolve_node(version, path).await
        }
    }

    async fn resolve_listing(&self, version: &SchemaVersion) -> ResolvedView {
        match self.backend.resources(version).await {
            Ok(listing) => ResolvedView::Listing { banner: listing_banner(version), listing },
            Err(LookupError::Service(message)) => ResolvedView::Error { message },
            Err(err) => {
                tracing::debug!(%version, error = %err, "resource listing unavailable");
                ResolvedView::Listing { banner: Vec::new(), listing: ResourceListing::default() }
            }
        }
    }

    async fn resolve_node(&self, version: &SchemaVersion, path: &Path) -> ResolvedView {
        let field_path = &path.field_path;
        let (node, example, versions) = futures::join!(
            self.backend.node(version, field_path, path.resource_version.as_deref()),
            optional("example", self.backend.example(version, field_path)),
            optional("resource versions", self.backend.resource_versions(version, field_path)),
        );

        let node = match node {
            Ok(node) => Some(node),
            Err(LookupError::Service(message)) => return ResolvedView::Error { message },
            Err(err) => {
                tracing::debug!(%path, error = %err, "node unavailable");
                None
            }
        };

        let alternate_versions = versions.filter(|v| v.len() > 1).unwrap_or_default();
        let selected_version = selected_version(&alternate_versions, path.resource_version.as_deref());

        ResolvedView::Node {
            description: node.as_ref().map(|n| description_lines(&n.description)).unwrap_or_default(),
            rows: node.as_ref().map(field_rows).unwrap_or_default(),
            node,
            example: example.flatten(),
            alternate_versions,
            selected_version,
        }
    }
}

/// Optional branch: any failure becomes "absent"
async fn optional<T>(what: &'static str, lookup: impl Future<Output = Result<T, LookupError>>) -> Option<T> {
    match lookup.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(lookup = what, error = %err, "optional lookup dropped");
            None
        }
    }
}

fn selected_version(alternates: &[String], pinned: Option<&str>) -> Option<String> {
    pinned
        .filter(|p| alternates.iter().any(|a| a == p))
        .map(String::from)
        .or_else(|| alternates.first().cloned())
}

pub fn listing_banner(version: &SchemaVersion) -> Vec<DescriptionLine> {
    let (product, release) = version.product_and_release();
    description_lines(&format!(
        "Available resources for {} version {}\n\
         The searchbox above supports all resources in the {} openAPI spec, even if a resource is not listed here.",
        product, release, product
    ))
}

/// Rows for every child of `node`, in schema order
pub fn field_rows(node: &ResolvedNode) -> Vec<FieldRow> {
    node.children
        .iter()
        .map(|child| FieldRow {
            name: child.name.clone(),
            type_display: type_display(child),
            description: child.description.as_deref().map(description_lines).unwrap_or_default(),
            required: node.required_children.contains(&child.name),
            navigable: child.nested,
        })
        .collect()
}

/// Type shown for a child.
///
/// `array` + subtype renders `[]Sub`, `object` + subtype renders `Sub`,
/// `array` + item type renders `[]Item`. Enum values replace all of it.
pub fn type_display(child: &ChildSummary) -> Option<TypeDisplay> {
    if !child.enum_values.is_empty() {
        return Some(TypeDisplay::Enum(child.enum_values.clone()));
    }
    let declared = child.type_name.as_deref()?;
    let name = match (declared, child.subtype.as_deref(), child.item_type.as_deref()) {
        ("array", Some(subtype), _) => format!("[]{}", subtype),
        ("object", Some(subtype), _) => subtype.to_string(),
        ("array", None, Some(item)) => format!("[]{}", item),
        (declared, _, _) => declared.to_string(),
    };
    Some(TypeDisplay::Named(name))
}
