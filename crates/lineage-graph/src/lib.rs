//! Lineage Genealogy Graph
//!
//! Read-only family queries (parents, children, siblings, spouses, ancestor
//! and descendant generations) over a [`FamilyRepository`].
//!
//! ## Key Concepts
//!
//! - **Request scope**: a [`GenealogyGraph`] borrows its repository and
//!   memoizes every lookup it makes. Build one per top-level request
//!   (a relationship query, a chart) and drop it afterwards so no state
//!   outlives the request.
//! - **Gender-resolved parents**: father and mother come from the spouses'
//!   genders, not from their position in the union. A second parent of the
//!   same gender is still returned, as the other parent.
//! - **Cycle guards**: generation walks keep a visited set, so re-marriage
//!   loops and duplicated records terminate.
//!
//! ## Example
//!
//! ```
//! use lineage_domain::{ChildRelation, Gender, Person, PersonId};
//! use lineage_graph::GenealogyGraph;
//! use lineage_store::InMemoryStore;
//!
//! let mut store = InMemoryStore::new();
//! let mother = store.create_person(Person::new(PersonId::new(0), Gender::Female)).unwrap();
//! let child = store.create_person(Person::new(PersonId::new(0), Gender::Male)).unwrap();
//! let union = store.create_union(Some(mother), None).unwrap();
//! store.add_child(union, child, None, ChildRelation::Biological).unwrap();
//!
//! let graph = GenealogyGraph::new(&store);
//! let parents = graph.get_parents(child).unwrap();
//! assert_eq!(parents.mother.map(|p| p.id), Some(mother));
//! assert!(parents.father.is_none());
//! ```
//!
//! [`FamilyRepository`]: lineage_domain::traits::FamilyRepository

#![warn(missing_docs)]

pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{GenealogyGraph, Parents, MAX_GENERATIONS};
