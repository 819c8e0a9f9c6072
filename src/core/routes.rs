//! Route names of the lookup service
//!
//! Centralized so the HTTP adapter and its test stub agree.

/// `resources/{version}` → `[{resource, description}]`
pub const RESOURCES: &str = "resources";
/// `search/{version}/{path}[/{resourceVersion}]` → node document
pub const SEARCH: &str = "search";
/// `examples/{version}/{path}` → `{result, source, text}`
pub const EXAMPLES: &str = "examples";
/// `resourceversions/{version}/{path}` → `["v1", ...]`
pub const RESOURCE_VERSIONS: &str = "resourceversions";
/// `keys/{version}/{prefix}` → `["pod", "pod.spec", ...]`
pub const KEYS: &str = "keys";

/// Default lookup service location
pub const DEFAULT_API_URL: &str = "http://localhost:8000/";

/// Autocomplete quiet period in milliseconds
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 1000;
