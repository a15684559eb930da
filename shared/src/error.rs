//! Error types for the storage and repository layers

use thiserror::Error;

use crate::models::CollectionStatus;

/// Faults raised by a key-value backend or while encoding its values
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Expected failures of repository operations; callers branch on these
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition {
        from: CollectionStatus,
        to: CollectionStatus,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<validator::ValidationErrors> for RepositoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RepositoryError::Validation(crate::validation::describe_validation_errors(&errors))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
