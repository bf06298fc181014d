//! Lineage Charts
//!
//! Builds pedigree-style charts around a focal person and lays them out on a
//! fixed canvas.
//!
//! ## Key Concepts
//!
//! - **Generation**: signed distance from the focal person. Ancestors are
//!   positive, descendants negative, and the focal person, their siblings and
//!   spouses sit at zero.
//! - **Chart types**: ancestor, descendant, hourglass (both) and family group
//!   (grandparents down to children, one generation each way).
//! - **Depth bound**: `generations` limits how far a walk goes, capped at
//!   [`lineage_graph::MAX_GENERATIONS`].
//! - **Layout**: a pure function of the chart. Rows are generations, each
//!   centered on the canvas midline.
//!
//! ## Architecture
//!
//! ```text
//! ChartGenerator ──> GenealogyGraph ──> FamilyRepository
//!       │                    PlaceRepository (place names)
//!       ▼
//!     Chart ──> layout(&Chart, &LayoutConfig) ──> Layout
//! ```
//!
//! ## Example
//!
//! ```
//! use lineage_chart::{layout, ChartConfig, ChartGenerator, LayoutConfig};
//! use lineage_domain::{ChildRelation, Gender, Person, PersonId};
//! use lineage_store::InMemoryStore;
//!
//! let mut store = InMemoryStore::new();
//! let mum = store.create_person(Person::new(PersonId::new(0), Gender::Female).named("Ann", "Lee")).unwrap();
//! let kid = store.create_person(Person::new(PersonId::new(0), Gender::Male).named("Bo", "Lee")).unwrap();
//! let union = store.create_union(Some(mum), None).unwrap();
//! store.add_child(union, kid, None, ChildRelation::Biological).unwrap();
//!
//! let chart = ChartGenerator::new(&store).generate(kid, &ChartConfig::ancestor(3)).unwrap();
//! assert_eq!(chart.nodes[&mum].generation, 1);
//!
//! let placed = layout(&chart, &LayoutConfig::default());
//! assert_eq!(placed.boxes.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod layout;
pub mod model;

pub use builder::ChartGenerator;
pub use config::{ChartConfig, ChartType, Direction};
pub use layout::{layout, Anchor, Bounds, EdgeLayout, Layout, LayoutConfig, NodeBox, Side};
pub use model::{Chart, ChartEdge, ChartNode};
