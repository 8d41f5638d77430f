use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Cannot convert '{field}' from {raw_value}")]
    Coercion { field: String, raw_value: String },

    #[error("Cluster API call '{operation}' failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("Cluster '{name}' not found: {source}")]
    NotFound {
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("Cannot set '{field}': {reason}")]
    FieldAssignment { field: String, reason: String },

    #[error("Environment config error: {0}")]
    Config(#[source] envy::Error),

    #[error("Unable to load manifest '{path}': {reason}")]
    Manifest { path: String, reason: String },
}

impl Error {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn coercion(field: &str, raw: &serde_json::Value) -> Self {
        Error::Coercion {
            field: field.to_owned(),
            raw_value: raw.to_string(),
        }
    }

    /// Short label used when counting errors
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation",
            Error::Coercion { .. } => "coercion",
            Error::Transport { .. } => "transport",
            Error::NotFound { .. } => "not_found",
            Error::FieldAssignment { .. } => "field_assignment",
            Error::Config(_) => "config",
            Error::Manifest { .. } => "manifest",
        }
    }
}
