//! Error types for graph queries

use lineage_domain::PersonId;
use thiserror::Error;

/// Errors that can occur during graph queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Person id unknown to the repository
    #[error("Person not found: {0}")]
    NotFound(PersonId),

    /// Repository error
    #[error("Storage error: {0}")]
    Store(String),
}

/// Result alias for graph queries
pub type Result<T> = std::result::Result<T, GraphError>;
