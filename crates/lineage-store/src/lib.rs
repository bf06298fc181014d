//! Lineage Storage Layer
//!
//! Implements the `FamilyRepository` and `PlaceRepository` traits over an
//! in-memory store, with JSON snapshots for persistence.
//!
//! # Architecture
//!
//! - Ordered maps for people, unions and places, so listings come out in id order
//! - Relationship edges derived from unions and rebuilt on every union change
//! - Place records deduplicated by normalized name
//! - Person timelines merging vital dates and life events across calendars
//! - Name search and duplicate-person detection
//! - Whole-dataset snapshots serialized with serde_json
//!
//! # Examples
//!
//! ```
//! use lineage_domain::{ChildRelation, Gender, Person, PersonId};
//! use lineage_domain::traits::FamilyRepository;
//! use lineage_store::InMemoryStore;
//!
//! let mut store = InMemoryStore::new();
//! let mother = store.create_person(Person::new(PersonId::new(0), Gender::Female)).unwrap();
//! let child = store.create_person(Person::new(PersonId::new(0), Gender::Male)).unwrap();
//!
//! let union = store.create_union(Some(mother), None).unwrap();
//! store.add_child(union, child, None, ChildRelation::Biological).unwrap();
//!
//! assert_eq!(store.get_edges(child).unwrap().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod memory;
pub mod places;
pub mod search;
pub mod snapshot;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use places::PlaceStats;
pub use search::{match_score, PotentialMatch, SearchOptions, MAX_MATCHES, MIN_QUERY_LEN};
pub use snapshot::Snapshot;
