//! Shared fixtures: a small schema database and instrumented backends

#![allow(dead_code)]

use async_trait::async_trait;
use manifests::backend::{NodeWire, VersionFixture};
use manifests::core::{ExampleDocument, ResolvedNode, ResourceListing};
use manifests::{
    Explorer, ExplorerConfig, FieldPath, LookupError, LookupResult, MemoryBackend, MemoryHistory, SchemaBackend,
    SchemaVersion, TokioPlatform,
};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

fn node(value: serde_json::Value) -> NodeWire {
    serde_json::from_value(value).expect("node fixture")
}

fn version_fixture(release: &str) -> VersionFixture {
    VersionFixture::default()
        .with_resource("pod", "Pod is a collection of containers that can run on a host.")
        .with_resource("ingress", "Ingress exposes HTTP routes.")
        .with_resource("service", "Service is a named abstraction of software service.")
        .with_node(
            "pod",
            node(json!({
                "gvk": {"group": "", "version": "v1", "kind": "Pod"},
                "description": format!("Pod in {}", release),
                "required": [],
                "properties": {
                    "metadata": {"type": "object", "subtype": "ObjectMeta", "properties": {}},
                    "spec": {"type": "object", "subtype": "PodSpec", "properties": {}},
                    "hostname": {"type": "string"}
                }
            })),
        )
        .with_node(
            "pod.spec",
            node(json!({
                "gvk": {"group": "", "version": "v1", "kind": "Pod"},
                "description": "PodSpec is a description of a pod.\nMore info: https://kubernetes.io/docs/concepts/workloads/pods",
                "required": ["containers"],
                "properties": {
                    "containers": {"type": "array", "subtype": "Container", "properties": {}},
                    "restartPolicy": {"type": "string", "enum": ["Always", "OnFailure", "Never"]},
                    "hostname": {"type": "string"}
                }
            })),
        )
        .with_node(
            "ingress",
            node(json!({
                "gvk": {"group": "networking.k8s.io", "version": "v1", "kind": "Ingress"},
                "description": "Ingress v1"
            })),
        )
        .with_node(
            "ingress/v1beta1",
            node(json!({
                "gvk": {"group": "networking.k8s.io", "version": "v1beta1", "kind": "Ingress"},
                "description": "Ingress v1beta1"
            })),
        )
        .with_node("service", node(json!({"description": "Service"})))
        .with_resource_versions("pod", &["v1"])
        .with_resource_versions("ingress", &["v1", "v1beta1"])
        .with_error("secret", "resource not found")
}

/// `k8s-1.27` and `k8s-1.28` with pods, ingresses and services
pub fn schema_backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_version("k8s-1.27", version_fixture("k8s-1.27"))
        .with_version("k8s-1.28", version_fixture("k8s-1.28"))
}

pub fn version(token: &str) -> SchemaVersion {
    ExplorerConfig::default().catalog.lookup(token).cloned().expect("known version")
}

pub fn explorer(backend: Rc<dyn SchemaBackend>, location: &str) -> (Explorer, Rc<MemoryHistory>) {
    let history = Rc::new(MemoryHistory::new(location));
    let explorer = Explorer::new(&ExplorerConfig::default(), backend, history.clone(), Rc::new(TokioPlatform));
    (explorer, history)
}

/// Let every ready task run. With the paused clock this only returns once
/// the event loop is otherwise idle.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Wraps a backend, delaying node lookups and recording every call
pub struct Instrumented {
    inner: MemoryBackend,
    node_delays: HashMap<String, Duration>,
    keys_delay: Duration,
    calls: RefCell<Vec<String>>,
}

impl Instrumented {
    pub fn new(inner: MemoryBackend) -> Self {
        Self { inner, node_delays: HashMap::new(), keys_delay: Duration::ZERO, calls: RefCell::new(Vec::new()) }
    }

    pub fn with_node_delay(mut self, field_path: &str, delay: Duration) -> Self {
        self.node_delays.insert(field_path.to_string(), delay);
        self
    }

    pub fn with_keys_delay(mut self, delay: Duration) -> Self {
        self.keys_delay = delay;
        self
    }

    /// Calls so far, as `"route version argument"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, route: &str) -> Vec<String> {
        self.calls().into_iter().filter(|c| c.starts_with(route)).collect()
    }

    fn record(&self, route: &str, version: &SchemaVersion, argument: &str) {
        self.calls.borrow_mut().push(format!("{} {} {}", route, version, argument));
    }
}

#[async_trait(?Send)]
impl SchemaBackend for Instrumented {
    async fn resources(&self, version: &SchemaVersion) -> LookupResult<ResourceListing> {
        self.record("resources", version, "");
        self.inner.resources(version).await
    }

    async fn node(
        &self,
        version: &SchemaVersion,
        field_path: &FieldPath,
        resource_version: Option<&str>,
    ) -> LookupResult<ResolvedNode> {
        self.record("node", version, &field_path.to_string());
        if let Some(delay) = self.node_delays.get(&field_path.to_string()) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.node(version, field_path, resource_version).await
    }

    async fn example(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Option<ExampleDocument>> {
        self.inner.example(version, field_path).await
    }

    async fn resource_versions(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Vec<String>> {
        self.inner.resource_versions(version, field_path).await
    }

    async fn keys(&self, version: &SchemaVersion, prefix: &str) -> LookupResult<Vec<String>> {
        self.record("keys", version, prefix);
        tokio::time::sleep(self.keys_delay).await;
        self.inner.keys(version, prefix).await
    }
}

/// Fails lookups with transport errors, the kind that carry no message
pub struct Unreachable {
    primary: Option<MemoryBackend>,
}

impl Unreachable {
    /// Every lookup fails
    pub fn everything() -> Self {
        Self { primary: None }
    }

    /// Listings and nodes come from `inner`; example, version and key lookups fail
    pub fn optional_lookups(inner: MemoryBackend) -> Self {
        Self { primary: Some(inner) }
    }

    fn down<T>(what: &str) -> LookupResult<T> {
        Err(LookupError::transport(format!("{} lookup: connection refused", what)))
    }
}

#[async_trait(?Send)]
impl SchemaBackend for Unreachable {
    async fn resources(&self, version: &SchemaVersion) -> LookupResult<ResourceListing> {
        match &self.primary {
            Some(inner) => inner.resources(version).await,
            None => Self::down("resources"),
        }
    }

    async fn node(
        &self,
        version: &SchemaVersion,
        field_path: &FieldPath,
        resource_version: Option<&str>,
    ) -> LookupResult<ResolvedNode> {
        match &self.primary {
            Some(inner) => inner.node(version, field_path, resource_version).await,
            None => Self::down("node"),
        }
    }

    async fn example(&self, _version: &SchemaVersion, _field_path: &FieldPath) -> LookupResult<Option<ExampleDocument>> {
        Self::down("example")
    }

    async fn resource_versions(&self, _version: &SchemaVersion, _field_path: &FieldPath) -> LookupResult<Vec<String>> {
        Self::down("resource versions")
    }

    async fn keys(&self, _version: &SchemaVersion, _prefix: &str) -> LookupResult<Vec<String>> {
        Self::down("keys")
    }
}
