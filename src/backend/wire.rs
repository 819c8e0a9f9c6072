//! JSON documents exchanged with the lookup service

use crate::core::{ChildSummary, ExampleDocument, GroupVersionKind, ResolvedNode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsWire {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

/// One entry of a node's `properties` map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyWire {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// Response of the `search` route
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gvk: Option<GroupVersionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl NodeWire {
    /// Convert to the view model, keeping property order.
    /// Properties that are not objects are skipped.
    pub fn into_node(self) -> ResolvedNode {
        let children = self
            .properties
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, value)| {
                let property: PropertyWire = serde_json::from_value(value).ok()?;
                Some(property.into_child(name))
            })
            .collect();
        ResolvedNode {
            kind: self.gvk.filter(|g| !g.kind.is_empty() || !g.version.is_empty()),
            description: self.description.unwrap_or_default(),
            type_name: self.type_,
            required_children: self.required.unwrap_or_default().into_iter().collect(),
            children,
        }
    }
}

impl PropertyWire {
    fn into_child(self, name: String) -> ChildSummary {
        ChildSummary {
            name,
            type_name: self.type_,
            subtype: self.subtype.filter(|s| !s.is_empty()),
            item_type: self.items.and_then(|i| i.type_).filter(|s| !s.is_empty()),
            description: self.description,
            nested: self.properties.is_some(),
            enum_values: self
                .enum_
                .unwrap_or_default()
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        }
    }
}

/// Response of the `examples` route
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExampleWire {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub text: String,
}

impl ExampleWire {
    /// An example only exists when `result` has content
    pub fn into_example(self) -> Option<ExampleDocument> {
        let content = self.result.filter(|r| !r.trim().is_empty())?;
        Some(ExampleDocument { content, source_url: self.source, source_label: self.text })
    }
}

/// Error body of a failed request
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorWire {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorWire {
    pub(crate) fn message(self) -> Option<String> {
        match self.detail? {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}
