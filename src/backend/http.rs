//! HTTP lookup service client

use super::wire::{ErrorWire, ExampleWire, NodeWire};
use super::{LookupResult, SchemaBackend};
use crate::core::{routes, ExampleDocument, FieldPath, ResolvedNode, ResourceListing, SchemaVersion};
use crate::error::{ConfigError, LookupError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Lookup service reached over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidApiUrl { url: api_url.to_string(), reason: reason.to_string() };
        let base = Url::parse(api_url).map_err(|e| invalid(&e.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) base url"));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(30));
        let http = builder.build().map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/{route}/{segments...}`, each segment percent-encoded
    fn endpoint(&self, route: &str, segments: &[&str]) -> LookupResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::transport(format!("cannot extend {}", self.base)))?
            .pop_if_empty()
            .push(route)
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> LookupResult<T> {
        tracing::debug!(%url, "lookup");
        let response = self.http.get(url.clone()).send().await.map_err(LookupError::transport)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| LookupError::transport(format!("unreadable response from {}: {}", url, e)));
        }

        let message = response.json::<ErrorWire>().await.ok().and_then(ErrorWire::message);
        match message {
            Some(message) => Err(LookupError::Service(message)),
            None => Err(LookupError::transport(format!("{} returned {}", url, status))),
        }
    }
}

#[async_trait(?Send)]
impl SchemaBackend for HttpBackend {
    async fn resources(&self, version: &SchemaVersion) -> LookupResult<ResourceListing> {
        let url = self.endpoint(routes::RESOURCES, &[version.as_str()])?;
        self.get(url).await
    }

    async fn node(
        &self,
        version: &SchemaVersion,
        field_path: &FieldPath,
        resource_version: Option<&str>,
    ) -> LookupResult<ResolvedNode> {
        let path = field_path.to_string();
        let mut segments = vec![version.as_str(), path.as_str()];
        segments.extend(resource_version);
        let url = self.endpoint(routes::SEARCH, &segments)?;
        let wire: NodeWire = self.get(url).await?;
        Ok(wire.into_node())
    }

    async fn example(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Option<ExampleDocument>> {
        let path = field_path.to_string();
        let url = self.endpoint(routes::EXAMPLES, &[version.as_str(), path.as_str()])?;
        let wire: ExampleWire = self.get(url).await?;
        Ok(wire.into_example())
    }

    async fn resource_versions(&self, version: &SchemaVersion, field_path: &FieldPath) -> LookupResult<Vec<String>> {
        let path = field_path.to_string();
        let url = self.endpoint(routes::RESOURCE_VERSIONS, &[version.as_str(), path.as_str()])?;
        self.get(url).await
    }

    async fn keys(&self, version: &SchemaVersion, prefix: &str) -> LookupResult<Vec<String>> {
        let url = self.endpoint(routes::KEYS, &[version.as_str(), prefix])?;
        self.get(url).await
    }
}
