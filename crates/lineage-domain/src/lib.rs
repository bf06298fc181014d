//! Lineage Domain Layer
//!
//! This crate contains the genealogical data model shared by every other
//! Lineage crate. It defines the entities, value objects, and repository
//! trait interfaces that the calendar, graph, kinship, and chart engines
//! depend upon.
//!
//! ## Key Concepts
//!
//! - **Person**: an individual with names, gender, and calendar-tagged life dates
//! - **Union**: a parental/marital pairing of up to two spouses and their children
//! - **RelationshipEdge**: a directed parent→child edge or a symmetric spouse edge
//! - **Place**: a deduplicated location keyed by its normalized name
//! - **Event**: a dated life event (baptism, census, emigration...) on a person's timeline
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Minimal dependencies (serde derives, UUIDv7 identifiers)
//! - Pure data and validation logic only
//! - Storage implementations live in other crates
//! - Trait definitions for all repository interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod event;
pub mod ids;
pub mod person;
pub mod place;
pub mod relationship;
pub mod traits;
pub mod union;

// Re-exports for convenience
pub use calendar::{CalendarSystem, DateValue};
pub use event::{Event, EventCategory, EventType, TimelineEntry};
pub use ids::{EventId, PersonId, PlaceId, UnionId};
pub use person::{Gender, NameFormat, Person};
pub use place::{normalize_place_name, Place, PlaceComponents, PlaceContext};
pub use relationship::{EdgeType, RelationshipEdge};
pub use traits::{FamilyRepository, PlaceRepository};
pub use union::{ChildLink, ChildRelation, Union, UnionStatus};
