//! Domain-level error types.

use thiserror::Error;

use crate::moderation::AbuseKind;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Post rejected: {0}")]
    Rejected(AbuseKind),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}
