//! Shared error types for Folio

use thiserror::Error;

/// Errors surfaced by the storage and query layers
#[derive(Debug, Error)]
pub enum FolioError {
    /// A required query or body parameter was absent or empty.
    /// Rejected before the query engine is invoked.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// No profile document exists. Distinct from empty query results.
    #[error("profile not found")]
    ProfileNotFound,

    /// A profile already exists (create path only, singleton invariant)
    #[error("profile already exists")]
    ProfileExists,

    /// Document failed validation on a write path
    #[error("validation failed: {0}")]
    Validation(String),

    /// MongoDB driver or connection failure
    #[error("database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
