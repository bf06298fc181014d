//! Chart nodes and edges
//!
//! Derived per request and never persisted. The whole structure serializes to
//! flat JSON maps and lists.

use crate::config::{ChartConfig, ChartType, Direction};
use lineage_domain::{EdgeType, Gender, PersonId, UnionId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One person on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartNode {
    /// Person id
    pub id: PersonId,

    /// Public person identifier
    pub uuid: uuid::Uuid,

    /// Short display name
    pub name: String,

    /// Full display name
    pub full_name: String,

    /// Gender
    pub gender: Gender,

    /// Distance from the focal person: positive for ancestors, negative for
    /// descendants
    pub generation: i32,

    /// Insertion position, used to order a generation's row
    #[serde(default)]
    pub order: usize,

    /// Photo url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Formatted birth date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Formatted death date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,

    /// Living flag, present with dates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living: Option<bool>,

    /// Birth place name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    /// Death place name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
}

/// A link between two chart nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEdge {
    /// Parent, or the spouse the link was found from
    pub from: PersonId,

    /// Child, or the other spouse
    pub to: PersonId,

    /// Link kind
    #[serde(rename = "type")]
    pub edge_type: EdgeType,

    /// Owning union, recorded on spouse links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union: Option<UnionId>,
}

impl ChartEdge {
    /// Parent to child link
    pub fn parent_child(parent: PersonId, child: PersonId) -> Self {
        Self {
            from: parent,
            to: child,
            edge_type: EdgeType::ParentChild,
            union: None,
        }
    }

    /// Spouse link
    pub fn spouse(a: PersonId, b: PersonId, union: UnionId) -> Self {
        Self {
            from: a,
            to: b,
            edge_type: EdgeType::Spouse,
            union: Some(union),
        }
    }

    /// Whether both edges draw the same link; spouse links are unordered
    pub fn same_link(&self, other: &ChartEdge) -> bool {
        if self.edge_type != other.edge_type {
            return false;
        }
        let forward = self.from == other.from && self.to == other.to;
        match self.edge_type {
            EdgeType::Spouse => forward || (self.from == other.to && self.to == other.from),
            EdgeType::ParentChild => forward,
        }
    }

    /// Identity of the drawn link; spouse endpoints are stored low id first
    fn link_key(&self) -> LinkKey {
        match self.edge_type {
            EdgeType::Spouse => (self.from.min(self.to), self.from.max(self.to), self.edge_type),
            EdgeType::ParentChild => (self.from, self.to, self.edge_type),
        }
    }
}

type LinkKey = (PersonId, PersonId, EdgeType);

/// A generated chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    /// Focal person
    pub root: PersonId,

    /// Chart type
    #[serde(rename = "type")]
    pub chart_type: ChartType,

    /// Layout direction
    pub direction: Direction,

    /// Nodes keyed by person id
    pub nodes: BTreeMap<PersonId, ChartNode>,

    /// Links in discovery order
    pub edges: Vec<ChartEdge>,

    /// Options the chart was built with
    pub config: ChartConfig,

    /// Keys of the links in `edges`
    #[serde(skip)]
    links: HashSet<LinkKey>,
}

impl PartialEq for Chart {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.chart_type == other.chart_type
            && self.direction == other.direction
            && self.nodes == other.nodes
            && self.edges == other.edges
            && self.config == other.config
    }
}

impl Chart {
    pub(crate) fn new(root: PersonId, config: &ChartConfig) -> Self {
        Self {
            root,
            chart_type: config.chart_type,
            direction: config.direction,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            config: config.clone(),
            links: HashSet::new(),
        }
    }

    /// Whether a person is on the chart
    pub fn contains(&self, id: PersonId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Add a node unless the person is already present
    ///
    /// Returns false when the person was already on the chart.
    pub(crate) fn insert_node(&mut self, mut node: ChartNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        node.order = self.nodes.len();
        self.nodes.insert(node.id, node);
        true
    }

    /// Add an edge unless the same link is already recorded
    ///
    /// Returns false when the link was already on the chart.
    pub(crate) fn insert_edge(&mut self, edge: ChartEdge) -> bool {
        if !self.links.insert(edge.link_key()) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Node ids grouped by generation, each row in insertion order
    pub fn generations(&self) -> BTreeMap<i32, Vec<PersonId>> {
        let mut rows: BTreeMap<i32, Vec<&ChartNode>> = BTreeMap::new();
        for node in self.nodes.values() {
            rows.entry(node.generation).or_default().push(node);
        }
        rows.into_iter()
            .map(|(generation, mut nodes)| {
                nodes.sort_by_key(|n| (n.order, n.id));
                (generation, nodes.into_iter().map(|n| n.id).collect())
            })
            .collect()
    }
}
