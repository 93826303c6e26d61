//! Error types shared by the repository, the service and the web layer.

use thiserror::Error;

/// Failures raised by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record violates a column constraint (length, non-null).
    #[error("constraint violation on `{field}`: {reason}")]
    Constraint { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("repository mutex poisoned")]
    Poisoned,
}

/// Failures raised by [`crate::backend::service::PersonService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Only the modify path reports a missing id as an error.
    #[error("no person with id '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
