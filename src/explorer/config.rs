//! Explorer Configuration - passed from higher layers

use crate::core::routes::{DEFAULT_API_URL, DEFAULT_QUIET_PERIOD_MS};
use crate::core::SchemaCatalog;
use crate::error::ConfigError;
use std::time::Duration;

pub const ENV_API_URL: &str = "MANIFESTS_API_URL";
pub const ENV_CATALOG: &str = "MANIFESTS_CATALOG";
pub const ENV_DEBOUNCE_MS: &str = "MANIFESTS_DEBOUNCE_MS";

/// Explorer configuration. Read-only once the explorer is built.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub api_url: String,
    pub catalog: SchemaCatalog,
    /// Autocomplete waits this long after the last keystroke
    pub quiet_period: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            catalog: SchemaCatalog::default(),
            quiet_period: Duration::from_millis(DEFAULT_QUIET_PERIOD_MS),
        }
    }
}

impl ExplorerConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self { self.api_url = url.into(); self }
    pub fn with_catalog(mut self, catalog: SchemaCatalog) -> Self { self.catalog = catalog; self }
    pub fn with_quiet_period(mut self, period: Duration) -> Self { self.quiet_period = period; self }

    /// Build from `MANIFESTS_*` environment variables, defaults for the rest
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = env_value(ENV_API_URL) {
            config.api_url = url;
        }
        if let Some(path) = env_value(ENV_CATALOG) {
            let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
            config.catalog = SchemaCatalog::from_json(&contents)?;
        }
        if let Some(ms) = env_value(ENV_DEBOUNCE_MS) {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::InvalidValue { key: ENV_DEBOUNCE_MS, value: ms.clone() })?;
            config.quiet_period = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
