//! In-memory lookup service, loaded from a JSON fixture
//!
//! ```json
//! {
//!   "k8s-1.28": {
//!     "resources": [{"resource": "pod", "description": "..."}],
//!     "nodes": {"pod": {...}, "pod.spec": {...}, "ingress/v1beta1": {...}},
//!     "examples": {"pod": {"result": "...", "source": "...", "text": "..."}},
//!     "resource_versions": {"ingress": ["v1", "v1beta1"]},
//!     "errors": {"secret": "resource not found"}
//!   }
//! }
//! ```
//!
//! Node keys take a `/{resourceVersion}` suffix for pinned lookups. Examples
//! and resource versions belong to the resource (the first path segment).
//! An `errors` entry keyed by `""` fails the resource listing.

use super::wire::{ExampleWire, NodeWire};
use super::{LookupResult, SchemaBackend};
use crate::core::{ExampleDocument, FieldPath, ResolvedNode, ResourceEntry, ResourceListing, SchemaVersion};
use crate::error::{ConfigError, LookupError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

const MAX_KEYS: usize = 25;

/// Everything known about one schema version
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionFixture {
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeWire>,
    #[serde(default)]
    pub examples: BTreeMap<String, ExampleWire>,
    #[serde(default)]
    pub resource_versions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl VersionFixture {
    pub fn with_resource(mut self, resource: &str, description: &str) -> Self {
        self.resources.push(ResourceEntry { resource: resource.into(), description: description.into() });
        self
    }

    pub fn with_node(mut self, key: &str, node: NodeWire) -> Self {
        self.nodes.insert(key.into(), node);
        self
    }

    pub fn with_example(mut self, resource: &str, example: ExampleWire) -> Self {
        self.examples.insert(resource.into(), example);
        self
    }

    pub fn with_resource_versions(mut self, resource: &str, versions: &[&str]) -> Self {
        self.resource_versions.insert(resource.into(), versions.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_error(mut self, key: &str, message: &str) -> Self {
        self.errors.insert(key.into(), message.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    versions: HashMap<String, VersionFixture>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: &str, fixture: VersionFixture) -> Self {
        self.versions.insert(version.into(), fixture);
        self
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let versions: HashMap<String, VersionFixture> = serde_json::from_value(value)?;
        Ok(Self { versions })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let versions: HashMap<String, VersionFixture> = serde_json::from_str(json)?;
        Ok(Self { versions })
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&contents)
    }

    fn fixture(&self, version: &SchemaVersion) -> LookupResult<&VersionFixture> {
        self.versions
            .get(version.as_str())
            .ok_or_else(|| LookupError::Service(format!("schema version {} is not available", version)))
    }
}

fn resource_of(field_path: &FieldPath) -> &str {
    field_path.segments().first().map(String::as_str).unwrap_or_default()
}

#[async_trait(?Send)]
impl SchemaBackend for MemoryBackend {
    async fn resources(&self, version: &SchemaVersion) -> LookupResult<ResourceListing> {
        let fixture = self.fixture(version)?;
        if let Some(message) = fixture.errors.get("") {
            return Err(LookupError::Service(message.clone()));
        }
        Ok(ResourceListing(fixture.resources.clone()))
    }

    async fn node(
        &self,
        version: &SchemaVersion,
        field_path: &FieldPath,
        resource_version: Option<&str>,
    ) -> LookupResult<ResolvedNode> {
        let fixture = self.fixture(version)?;
        let key = match resource_version {
            Some(pinned) => format!("{}/{}", field_path, pinned),
            None => field_path.to_string(),
        };
        if let Some(message) = fixture.errors.get(&key) {
            return Err(LookupError::Service(message.clone()));
        }
        fixture
            .nodes
            .get(&key)
            .cloned()
            .map(NodeWire::into_node)
            .ok_or_else(|| LookupError::Service(format!("{} was not found in {}", key, version)))
    }

    async fn example(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Option<ExampleDocument>> {
        let fixture = self.fixture(version)?;
        Ok(fixture.examples.get(resource_of(field_path)).cloned().and_then(ExampleWire::into_example))
    }

    async fn resource_versions(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Vec<String>> {
        let fixture = self.fixture(version)?;
        Ok(fixture.resource_versions.get(resource_of(field_path)).cloned().unwrap_or_default())
    }

    async fn keys(&self, version: &SchemaVersion, prefix: &str) -> LookupResult<Vec<String>> {
        let fixture = self.fixture(version)?;
        Ok(fixture
            .nodes
            .keys()
            .filter(|key| !key.contains('/') && key.starts_with(prefix))
            .take(MAX_KEYS)
            .cloned()
            .collect())
    }
}
