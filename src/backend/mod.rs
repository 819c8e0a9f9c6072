//! Backend: the lookup collaborators the explorer consumes
//!
//! # Lookups
//!
//! | Method | Input | Success |
//! |--------|-------|---------|
//! | `resources` | version | resource listing |
//! | `node` | version, field path, pinned resource version | node metadata |
//! | `example` | version, field path | example document, if any |
//! | `resource_versions` | version, field path | alternate versions |
//! | `keys` | version, prefix | autocomplete candidates |
//!
//! Everything runs on one event loop, so the futures are not `Send`.

mod http;
mod memory;
mod wire;

pub use http::HttpBackend;
pub use memory::{MemoryBackend, VersionFixture};
pub use wire::{ExampleWire, ItemsWire, NodeWire, PropertyWire};

use crate::core::{ExampleDocument, FieldPath, ResolvedNode, ResourceListing, SchemaVersion};
use crate::error::LookupError;
use async_trait::async_trait;

pub type LookupResult<T> = Result<T, LookupError>;

#[async_trait(?Send)]
pub trait SchemaBackend {
    async fn resources(&self, version: &SchemaVersion) -> LookupResult<ResourceListing>;

    async fn node(
        &self,
        version: &SchemaVersion,
        field_path: &FieldPath,
        resource_version: Option<&str>,
    ) -> LookupResult<ResolvedNode>;

    async fn example(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Option<ExampleDocument>>;

    async fn resource_versions(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Vec<String>>;

    async fn keys(&self, version: &SchemaVersion, prefix: &str) -> LookupResult<Vec<String>>;
}
