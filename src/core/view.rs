//! View model: what a resolution produces for the presentation layer

use super::path::Path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const MORE_INFO_MARKER: &str = "More info: ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVersionKind {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kind: String,
}

impl GroupVersionKind {
    /// `group/version`, or just `version` for the core group
    pub fn api_version(&self) -> String {
        let group = self.group.trim();
        if group.is_empty() {
            self.version.trim().to_string()
        } else {
            format!("{}/{}", group, self.version.trim())
        }
    }
}

/// Summary of one child of a resolved node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSummary {
    pub name: String,
    pub type_name: Option<String>,
    pub subtype: Option<String>,
    pub item_type: Option<String>,
    pub description: Option<String>,
    /// Child has properties of its own and can be navigated into
    pub nested: bool,
    pub enum_values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub kind: Option<GroupVersionKind>,
    pub description: String,
    pub type_name: Option<String>,
    pub required_children: BTreeSet<String>,
    /// In schema order
    pub children: Vec<ChildSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub resource: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceListing(pub Vec<ResourceEntry>);

impl ResourceListing {
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.0
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.0.iter().any(|e| e.resource == resource)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleDocument {
    pub content: String,
    pub source_url: String,
    pub source_label: String,
}

/// One line of a description, with its trailing "More info" link split off
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionLine {
    pub text: String,
    pub more_info: Option<String>,
}

pub fn description_lines(description: &str) -> Vec<DescriptionLine> {
    if description.is_empty() {
        return Vec::new();
    }
    description
        .split('\n')
        .map(|line| match line.split_once(MORE_INFO_MARKER) {
            Some((text, link)) if !link.contains(MORE_INFO_MARKER) => DescriptionLine {
                text: text.trim_end().to_string(),
                more_info: Some(link.trim().to_string()),
            },
            // Ambiguous links are dropped; the leading text is kept
            Some((text, _)) => DescriptionLine { text: text.trim_end().to_string(), more_info: None },
            None => DescriptionLine { text: line.to_string(), more_info: None },
        })
        .collect()
}

/// How a field's type is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TypeDisplay {
    Named(String),
    Enum(Vec<String>),
}

impl fmt::Display for TypeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDisplay::Named(name) => f.write_str(name),
            TypeDisplay::Enum(values) => {
                f.write_str("Enum:")?;
                for value in values {
                    write!(f, "\n  - {}", value)?;
                }
                Ok(())
            }
        }
    }
}

pub const REQUIRED_MARKER: &str = "*";

/// Displayable row for one child of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRow {
    pub name: String,
    pub type_display: Option<TypeDisplay>,
    pub description: Vec<DescriptionLine>,
    pub required: bool,
    pub navigable: bool,
}

impl FieldRow {
    /// Type text followed by the required marker, e.g. `[]Container *`
    pub fn type_label(&self) -> String {
        let mut label = self.type_display.as_ref().map(ToString::to_string).unwrap_or_default();
        if self.required {
            if !label.is_empty() {
                label.push(' ');
            }
            label.push_str(REQUIRED_MARKER);
        }
        label
    }
}

/// Everything to display for one path. Replaced wholesale on every resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedView {
    Error {
        message: String,
    },
    Listing {
        banner: Vec<DescriptionLine>,
        listing: ResourceListing,
    },
    #[serde(rename_all = "camelCase")]
    Node {
        /// None when the node lookup failed without a message
        node: Option<ResolvedNode>,
        description: Vec<DescriptionLine>,
        rows: Vec<FieldRow>,
        example: Option<ExampleDocument>,
        /// Empty unless there are at least two versions to choose from
        alternate_versions: Vec<String>,
        selected_version: Option<String>,
    },
}

impl ResolvedView {
    /// Whether `segment` is a row that can be navigated into
    pub fn is_navigable(&self, segment: &str) -> bool {
        match self {
            ResolvedView::Error { .. } => false,
            ResolvedView::Listing { listing, .. } => listing.contains(segment),
            ResolvedView::Node { rows, .. } => rows.iter().any(|r| r.name == segment && r.navigable),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResolvedView::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// State published to observers after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub path: Path,
    pub url: String,
    /// In-progress search text, distinct from the committed field path
    pub draft: String,
    /// A resolution for `path` is in flight
    pub loading: bool,
    pub view: Option<ResolvedView>,
    pub suggestions: Vec<String>,
    pub suggestions_loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_lines_split_more_info() {
        let lines = description_lines(
            "Standard object's metadata.\nMore info: https://git.k8s.io/community/contributors/devel/sig-architecture/api-conventions.md#metadata",
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], DescriptionLine { text: "Standard object's metadata.".into(), more_info: None });
        assert_eq!(lines[1].text, "");
        assert!(lines[1].more_info.as_deref().unwrap().ends_with("#metadata"));

        let inline = description_lines("Kind of object. More info: https://example.com/kinds");
        assert_eq!(inline[0].text, "Kind of object.");
        assert_eq!(inline[0].more_info.as_deref(), Some("https://example.com/kinds"));

        assert!(description_lines("").is_empty());
    }

    #[test]
    fn test_description_lines_repeated_marker_keeps_leading_text() {
        let lines = description_lines("Selector. More info: https://a.example More info: https://b.example");
        assert_eq!(lines, [DescriptionLine { text: "Selector.".into(), more_info: None }]);
    }

    #[test]
    fn test_api_version() {
        let core = GroupVersionKind { group: String::new(), version: "v1".into(), kind: "Pod".into() };
        assert_eq!(core.api_version(), "v1");
        let apps = GroupVersionKind { group: "apps".into(), version: "v1 ".into(), kind: "Deployment".into() };
        assert_eq!(apps.api_version(), "apps/v1");
    }

    #[test]
    fn test_type_label() {
        let row = FieldRow {
            name: "containers".into(),
            type_display: Some(TypeDisplay::Named("[]Container".into())),
            description: Vec::new(),
            required: true,
            navigable: true,
        };
        assert_eq!(row.type_label(), "[]Container *");

        let enum_row = FieldRow {
            type_display: Some(TypeDisplay::Enum(vec!["Always".into(), "Never".into()])),
            required: false,
            ..row
        };
        assert_eq!(enum_row.type_label(), "Enum:\n  - Always\n  - Never");
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let view = ResolvedView::Error { message: "resource not found".into() };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"kind": "error", "message": "resource not found"})
        );
    }
}
