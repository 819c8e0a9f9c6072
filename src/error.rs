//! Error types shared by the explorer and its collaborators

use thiserror::Error;

/// Failure of a collaborator lookup.
///
/// Only `Service` failures of the primary node/listing lookup ever reach the
/// user; every other failure is absorbed where it happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The service answered with an explicit, human-readable message.
    #[error("{0}")]
    Service(String),
    /// Transport failure or a response without a usable message.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl LookupError {
    pub fn transport(detail: impl ToString) -> Self {
        LookupError::Transport(detail.to_string())
    }

    /// Message to show the user, if the service provided one
    pub fn service_message(&self) -> Option<&str> {
        match self {
            LookupError::Service(message) => Some(message),
            LookupError::Transport(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("schema catalog has no choices")]
    EmptyCatalog,
    #[error("default schema version '{0}' is not one of the catalog choices")]
    UnknownDefault(String),
    #[error("schema version '{0}' is listed more than once")]
    DuplicateChoice(String),
    #[error("invalid api url '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http client: {0}")]
    Client(String),
}

/// Failure to read or rewrite the address bar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history unavailable: {0}")]
    Unavailable(String),
}
