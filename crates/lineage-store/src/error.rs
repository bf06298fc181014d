//! Error types for storage operations

use lineage_domain::{EventId, PersonId, PlaceId, UnionId};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Person not found
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    /// Union not found
    #[error("Union not found: {0}")]
    UnionNotFound(UnionId),

    /// Place not found
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),

    /// Event not found
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// Person still has relationship edges
    #[error("Person {0} has relationships and cannot be deleted")]
    HasRelationships(PersonId),

    /// Place still referenced by people or unions
    #[error("Place {0} is in use and cannot be deleted")]
    PlaceInUse(PlaceId),

    /// Person already listed as a child of the union
    #[error("Person {person} is already a child of union {union}")]
    DuplicateChild {
        /// Union
        union: UnionId,
        /// Child
        person: PersonId,
    },

    /// Person is not a child of the union
    #[error("Person {person} is not a child of union {union}")]
    NotAChild {
        /// Union
        union: UnionId,
        /// Person
        person: PersonId,
    },

    /// Another union already joins the same pair
    #[error("A union between these spouses already exists: {0}")]
    DuplicateUnion(UnionId),

    /// Another place already has the same normalized name
    #[error("A place with the key '{0}' already exists")]
    DuplicatePlace(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;
