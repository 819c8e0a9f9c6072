//! Schema versions: the fixed list of choices and the designated default

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of one schema variant, e.g. `k8s-1.28`.
///
/// Only a [`SchemaCatalog`] hands these out, so holding one means the token
/// is a known choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split `product-version` on the first `-`
    pub fn product_and_release(&self) -> (&str, &str) {
        self.0.split_once('-').unwrap_or((&self.0, ""))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDef {
    choices: Vec<String>,
    default: String,
}

/// Immutable list of schema versions, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCatalog {
    choices: Vec<SchemaVersion>,
    default: usize,
}

const BUILTIN_CHOICES: &[&str] = &[
    "k8s-1.22", "k8s-1.23", "k8s-1.24", "k8s-1.25", "k8s-1.26", "k8s-1.27", "k8s-1.28",
];
const BUILTIN_DEFAULT: &str = "k8s-1.28";

impl SchemaCatalog {
    pub fn new<I, S>(choices: I, default: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<SchemaVersion> = choices.into_iter().map(|c| SchemaVersion(c.into())).collect();
        if choices.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for choice in &choices {
            if !seen.insert(choice.as_str()) {
                return Err(ConfigError::DuplicateChoice(choice.0.clone()));
            }
        }
        let default = choices
            .iter()
            .position(|c| c.as_str() == default)
            .ok_or_else(|| ConfigError::UnknownDefault(default.to_string()))?;
        Ok(Self { choices, default })
    }

    /// Parse `{"choices": [...], "default": "..."}`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let def: CatalogDef = serde_json::from_str(json)?;
        Self::new(def.choices, &def.default)
    }

    pub fn default_version(&self) -> &SchemaVersion {
        &self.choices[self.default]
    }

    pub fn choices(&self) -> &[SchemaVersion] {
        &self.choices
    }

    /// Known choice matching `token` exactly
    pub fn lookup(&self, token: &str) -> Option<&SchemaVersion> {
        self.choices.iter().find(|c| c.as_str() == token)
    }

    /// Known choice matching `token`, or the default
    pub fn lookup_or_default(&self, token: &str) -> &SchemaVersion {
        self.lookup(token).unwrap_or_else(|| self.default_version())
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self {
            choices: BUILTIN_CHOICES.iter().map(|c| SchemaVersion((*c).to_string())).collect(),
            default: BUILTIN_CHOICES.iter().position(|c| *c == BUILTIN_DEFAULT).unwrap_or(0),
        }
    }
}
