//! Shortest relationship paths
//!
//! Breadth-first search over relationship edges. Parent-child edges are
//! followed in both directions and record whether the hop went up to a
//! parent or down to a child; spouse edges are lateral hops.

use lineage_domain::traits::FamilyRepository;
use lineage_domain::{EdgeType, PersonId};
use lineage_graph::{GenealogyGraph, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Display;
use tracing::debug;

/// Direction of one hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// To a parent
    Up,
    /// To a child
    Down,
    /// To a spouse
    Spouse,
}

/// One traversed edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// Person the hop starts at
    pub from: PersonId,
    /// Person the hop ends at
    pub to: PersonId,
    /// Direction
    pub step: Step,
}

/// Step counts over a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathTally {
    /// Hops to a parent
    pub ups: u32,
    /// Hops to a child
    pub downs: u32,
    /// Hops to a spouse
    pub spouse_steps: u32,
}

impl PathTally {
    /// Tally from explicit counts
    pub fn new(ups: u32, downs: u32, spouse_steps: u32) -> Self {
        Self {
            ups,
            downs,
            spouse_steps,
        }
    }
}

/// A path between two people, start to end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipPath {
    /// Hops in order; empty when start and end are the same person
    pub hops: Vec<Hop>,
}

impl RelationshipPath {
    /// Number of hops
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Whether the path has no hops
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Count the hops of each kind
    pub fn tally(&self) -> PathTally {
        self.hops.iter().fold(PathTally::default(), |mut tally, hop| {
            match hop.step {
                Step::Up => tally.ups += 1,
                Step::Down => tally.downs += 1,
                Step::Spouse => tally.spouse_steps += 1,
            }
            tally
        })
    }
}

/// Find the shortest path from `start` to `end` within `max_depth` hops
///
/// Among equally short paths the first one reached in edge order wins.
/// People already visited are skipped, so loops in the data are harmless.
pub fn find_path<R>(
    graph: &GenealogyGraph<'_, R>,
    start: PersonId,
    end: PersonId,
    max_depth: usize,
) -> Result<Option<RelationshipPath>>
where
    R: FamilyRepository,
    R::Error: Display,
{
    if start == end {
        return Ok(Some(RelationshipPath { hops: Vec::new() }));
    }

    let mut visited = HashSet::from([start]);
    let mut came_from: HashMap<PersonId, Hop> = HashMap::new();
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for edge in graph.edges(current)? {
            if !edge.involves(current) {
                continue;
            }
            let other = edge.other(current);
            if visited.contains(&other) {
                continue;
            }

            let step = match edge.edge_type {
                EdgeType::Spouse => Step::Spouse,
                EdgeType::ParentChild if edge.person1 == current => Step::Down,
                EdgeType::ParentChild => Step::Up,
            };
            came_from.insert(
                other,
                Hop {
                    from: current,
                    to: other,
                    step,
                },
            );

            if other == end {
                let path = unwind(&came_from, start, end);
                debug!(from = %start, to = %end, hops = path.len(), "Found relationship path");
                return Ok(Some(path));
            }

            visited.insert(other);
            queue.push_back((other, depth + 1));
        }
    }

    debug!(from = %start, to = %end, max_depth, visited = visited.len(), "No relationship path");
    Ok(None)
}

fn unwind(came_from: &HashMap<PersonId, Hop>, start: PersonId, end: PersonId) -> RelationshipPath {
    let mut hops = Vec::new();
    let mut cursor = end;
    while cursor != start {
        let Some(hop) = came_from.get(&cursor) else {
            break;
        };
        hops.push(*hop);
        cursor = hop.from;
    }
    hops.reverse();
    RelationshipPath { hops }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(step: Step) -> Hop {
        Hop {
            from: PersonId::new(1),
            to: PersonId::new(2),
            step,
        }
    }

    #[test]
    fn test_tally_counts_each_step() {
        let path = RelationshipPath {
            hops: vec![hop(Step::Up), hop(Step::Up), hop(Step::Down), hop(Step::Spouse)],
        };
        assert_eq!(path.tally(), PathTally::new(2, 1, 1));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_step_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Step::Spouse).unwrap(), "\"spouse\"");
        assert_eq!(serde_json::to_string(&Step::Up).unwrap(), "\"up\"");
    }
}
