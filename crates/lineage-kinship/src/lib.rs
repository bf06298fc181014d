//! Lineage Kinship Resolver
//!
//! Computes the English kinship term between two people in a family graph.
//!
//! ## Key Concepts
//!
//! - **Path search**: breadth-first over relationship edges from the first
//!   person, bounded by [`ResolverConfig::max_depth`]. The first path found
//!   is the shortest in hops.
//! - **Tally**: a path reduces to counts of up (to parent), down (to child)
//!   and spouse hops. The term depends only on the tally and the second
//!   person's gender.
//! - **Cousins**: two lines of `ups` and `downs` hops from a common ancestor
//!   are `(min - 1)`th cousins, removed `|ups - downs|` times.
//!
//! ## Architecture
//!
//! ```text
//! RelationshipResolver ──> find_path ──> GenealogyGraph ──> FamilyRepository
//!          │
//!          └──> classify(PathTally, Gender)
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod path;
pub mod resolver;
pub mod terms;

pub use config::{ResolverConfig, DEFAULT_MAX_DEPTH, MAX_SEARCH_DEPTH};
pub use path::{find_path, Hop, PathTally, RelationshipPath, Step};
pub use resolver::RelationshipResolver;
pub use terms::{classify, ordinal, DISTANT_RELATIVE, NOT_RELATED, SELF};
