//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the genealogical engines and
//! storage. Implementations live in other crates.

use crate::{ChildLink, Person, PersonId, Place, PlaceId, RelationshipEdge, Union, UnionId};

/// Trait for reading people, unions and edges
///
/// Implemented by the infrastructure layer (lineage-store). Lookups are
/// targeted by id so the graph can fetch only what a query touches.
pub trait FamilyRepository {
    /// Error type for repository operations
    type Error;

    /// Get a person by ID
    fn get_person(&self, id: PersonId) -> Result<Option<Person>, Self::Error>;

    /// Get a union by ID
    fn get_union(&self, id: UnionId) -> Result<Option<Union>, Self::Error>;

    /// Unions in which the person is a spouse/partner, ordered by union id
    fn get_unions_by_spouse(&self, person: PersonId) -> Result<Vec<Union>, Self::Error>;

    /// Children of a union, in birth order
    fn get_children_of_union(&self, union: UnionId) -> Result<Vec<ChildLink>, Self::Error>;

    /// The union the person was born or adopted into, if any
    fn get_union_as_child(&self, person: PersonId) -> Result<Option<Union>, Self::Error>;

    /// Every edge touching the person, in insertion order
    fn get_edges(&self, person: PersonId) -> Result<Vec<RelationshipEdge>, Self::Error>;
}

/// Trait for place deduplication
///
/// Implemented by the infrastructure layer (lineage-store)
pub trait PlaceRepository {
    /// Error type for place operations
    type Error;

    /// Return the place whose normalized key matches `name`, creating it if absent
    fn get_or_create_place(&mut self, name: &str) -> Result<Place, Self::Error>;

    /// Get a place by ID
    fn get_place(&self, id: PlaceId) -> Result<Option<Place>, Self::Error>;
}
