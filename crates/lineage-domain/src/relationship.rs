//! Relationship edges - the authoritative graph structure
//!
//! Parent-child edges are directed (parent → child). Spouse edges are stored
//! once and traversed both ways.

use crate::{PersonId, UnionId};
use serde::{Deserialize, Serialize};

/// Type of edge between two people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// `person1` is a parent of `person2`
    ParentChild,

    /// `person1` and `person2` are spouses/partners
    Spouse,
}

impl EdgeType {
    /// Storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::ParentChild => "parent_child",
            EdgeType::Spouse => "spouse",
        }
    }
}

/// A relationship edge between two people
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// Parent (for parent-child) or first spouse
    pub person1: PersonId,

    /// Child (for parent-child) or second spouse
    pub person2: PersonId,

    /// Type of edge
    pub edge_type: EdgeType,

    /// Union that produced this edge, if any
    #[serde(default)]
    pub union: Option<UnionId>,
}

impl RelationshipEdge {
    /// Parent → child edge
    pub fn parent_child(parent: PersonId, child: PersonId, union: Option<UnionId>) -> Self {
        Self {
            person1: parent,
            person2: child,
            edge_type: EdgeType::ParentChild,
            union,
        }
    }

    /// Spouse edge
    pub fn spouse(a: PersonId, b: PersonId, union: Option<UnionId>) -> Self {
        Self {
            person1: a,
            person2: b,
            edge_type: EdgeType::Spouse,
            union,
        }
    }

    /// Whether the edge touches the person
    pub fn involves(&self, person: PersonId) -> bool {
        self.person1 == person || self.person2 == person
    }

    /// The endpoint opposite `person`
    pub fn other(&self, person: PersonId) -> PersonId {
        if self.person1 == person {
            self.person2
        } else {
            self.person1
        }
    }

    /// Whether this edge connects the same people with the same type as `other`
    ///
    /// Spouse edges compare as unordered pairs.
    pub fn same_link(&self, other: &RelationshipEdge) -> bool {
        if self.edge_type != other.edge_type {
            return false;
        }
        match self.edge_type {
            EdgeType::ParentChild => self.person1 == other.person1 && self.person2 == other.person2,
            EdgeType::Spouse => {
                (self.person1 == other.person1 && self.person2 == other.person2)
                    || (self.person1 == other.person2 && self.person2 == other.person1)
            }
        }
    }
}
