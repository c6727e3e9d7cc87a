//! Error types for capy-icons

use crate::types::ResourceId;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, IconError>;

/// Icon provider errors.
///
/// None of these reach callers of `IconProvider::icon` or
/// `IconProvider::icon_system_state`; they are recovered internally and only
/// surface from the collaborator traits and the host-side helpers.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("Unknown icon provider: {0}")]
    UnknownProvider(String),

    #[error("Icon provider '{id}' failed to construct: {reason}")]
    ProviderConstruction { id: String, reason: String },

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceId),

    #[error("Malformed override table {id}: {reason}")]
    MalformedOverrideTable { id: ResourceId, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
