//! Path model: the navigation location and its URL form
//!
//! ```text
//! /{schemaVersion}/{dotted.field.path}[/{resourceVersion}]
//! ```
//!
//! Parsing never fails. An unknown schema-version token is replaced by the
//! catalog default and folded into the field path.

use super::catalog::{SchemaCatalog, SchemaVersion};
use serde::Serialize;
use std::fmt;

/// Ordered identifier segments, written with `.` separators.
/// Empty means "list the top-level resources".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Split dotted text into segments, dropping empty ones
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(['.', '/'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// This path extended by `segment` (which may itself be dotted)
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.extend(Self::parse(segment).0);
        Self(segments)
    }

    fn join(mut self, other: FieldPath) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Current navigation location. Compared by value for change detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Unset only before the explorer has been initialized
    pub schema_version: Option<SchemaVersion>,
    pub field_path: FieldPath,
    /// Pins resolution to an alternate version of the resolved resource
    pub resource_version: Option<String>,
}

impl Path {
    pub fn new(schema_version: SchemaVersion, field_path: FieldPath, resource_version: Option<String>) -> Self {
        Self { schema_version: Some(schema_version), field_path, resource_version: normalize_override(resource_version) }
    }

    /// Resource list view for `schema_version`
    pub fn listing(schema_version: SchemaVersion) -> Self {
        Self::new(schema_version, FieldPath::default(), None)
    }

    /// Parse a URL path (`location.pathname`). Query and fragment are ignored.
    pub fn parse(url_path: &str, catalog: &SchemaCatalog) -> Self {
        let url_path = url_path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = url_path.strip_prefix('/').unwrap_or(url_path);
        let default = catalog.default_version();

        if trimmed.is_empty() {
            return Self::listing(default.clone());
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            [only] => match catalog.lookup(only) {
                Some(version) => Self::listing(version.clone()),
                None => Self::new(default.clone(), FieldPath::parse(only), None),
            },
            [first, field, rest @ ..] => {
                let (version, field_path) = match catalog.lookup(first) {
                    Some(version) => (version.clone(), FieldPath::parse(field)),
                    None => (default.clone(), FieldPath::parse(first).join(FieldPath::parse(field))),
                };
                // Segments past the third carry no meaning and are dropped.
                let resource_version = rest.first().map(|s| s.to_string());
                Self::new(version, field_path, resource_version)
            }
            [] => Self::listing(default.clone()),
        }
    }

    /// Canonical URL path
    pub fn to_url(&self) -> String {
        let version = self.schema_version.as_ref().map(SchemaVersion::as_str).unwrap_or_default();
        match &self.resource_version {
            Some(pinned) => format!("/{}/{}/{}", version, self.field_path, pinned),
            None => format!("/{}/{}", version, self.field_path),
        }
    }

    pub fn is_listing(&self) -> bool {
        self.field_path.is_empty()
    }

    pub fn with_schema_version(&self, version: SchemaVersion) -> Self {
        Self { schema_version: Some(version), field_path: self.field_path.clone(), resource_version: None }
    }

    pub fn with_field_path(&self, field_path: FieldPath) -> Self {
        Self { schema_version: self.schema_version.clone(), field_path, resource_version: None }
    }

    pub fn with_resource_version(&self, resource_version: Option<String>) -> Self {
        Self {
            schema_version: self.schema_version.clone(),
            field_path: self.field_path.clone(),
            resource_version: normalize_override(resource_version),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

fn normalize_override(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_matches('/').to_string())
        .filter(|v| !v.is_empty() && !v.contains('/'))
}
