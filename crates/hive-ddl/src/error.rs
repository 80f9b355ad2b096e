//! Error types for schema construction and definition loading

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid {entity} definition: {argument} {reason}")]
    InvalidDefinition {
        entity: &'static str,
        argument: &'static str,
        reason: String,
    },

    #[error("Failed to parse JSON definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SchemaError {
    pub(crate) fn invalid(entity: &'static str, argument: &'static str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidDefinition {
            entity,
            argument,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
