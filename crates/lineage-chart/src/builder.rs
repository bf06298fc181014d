//! Chart graph building
//!
//! Walks the family graph outward from the focal person. Ancestor and
//! descendant walks go breadth-first, so a person reachable along several
//! lines (cousin marriages, duplicated records) is placed at the nearest
//! generation and expanded once.

use crate::config::{ChartConfig, ChartType};
use crate::model::{Chart, ChartEdge, ChartNode};
use lineage_calendar::format_for_display;
use lineage_domain::traits::{FamilyRepository, PlaceRepository};
use lineage_domain::{DateValue, NameFormat, Person, PersonId, PlaceId};
use lineage_graph::GenealogyGraph;
use std::collections::{HashSet, VecDeque};
use std::fmt::Display;
use tracing::{debug, warn};

/// Builds charts from a repository
///
/// The repository supplies people, unions and (for `show_places`) place
/// names. Each [`generate`](Self::generate) call uses a fresh
/// request-scoped [`GenealogyGraph`].
///
/// # Examples
///
/// ```
/// use lineage_chart::{ChartConfig, ChartGenerator};
/// use lineage_domain::{Gender, Person, PersonId};
/// use lineage_store::InMemoryStore;
///
/// let mut store = InMemoryStore::new();
/// let id = store.create_person(Person::new(PersonId::new(0), Gender::Female)).unwrap();
///
/// let generator = ChartGenerator::new(&store);
/// let chart = generator.generate(id, &ChartConfig::default()).unwrap();
/// assert_eq!(chart.nodes.len(), 1);
/// assert!(generator.generate(PersonId::new(99), &ChartConfig::default()).is_none());
/// ```
pub struct ChartGenerator<'a, R> {
    repo: &'a R,
}

impl<'a, R> ChartGenerator<'a, R>
where
    R: FamilyRepository + PlaceRepository,
    <R as FamilyRepository>::Error: Display,
    <R as PlaceRepository>::Error: Display,
{
    /// Create a generator over a repository
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Build a chart around `root`
    ///
    /// Returns `None` when the root person cannot be found. Missing or
    /// unreadable relatives end their line without failing the chart.
    pub fn generate(&self, root: PersonId, config: &ChartConfig) -> Option<Chart> {
        let graph = GenealogyGraph::new(self.repo);
        let person = match graph.person(root) {
            Ok(Some(person)) => person,
            Ok(None) => {
                debug!(person = %root, "Chart root not found");
                return None;
            }
            Err(e) => {
                warn!(person = %root, error = %e, "Chart root lookup failed");
                return None;
            }
        };

        let mut builder = Builder {
            graph: &graph,
            places: self.repo,
            config: config.clone(),
            limit: config.effective_generations(),
            chart: Chart::new(root, config),
        };

        match config.chart_type {
            ChartType::Ancestor => builder.ancestors(&person),
            ChartType::Descendant => builder.descendants(&person),
            ChartType::Hourglass => {
                builder.ancestors(&person);
                builder.descendants(&person);
            }
            ChartType::Family => builder.family(&person),
        }

        let chart = builder.chart;
        debug!(
            person = %root,
            chart_type = %config.chart_type,
            nodes = chart.nodes.len(),
            edges = chart.edges.len(),
            "Generated chart"
        );
        Some(chart)
    }
}

struct Builder<'g, 'a, R: FamilyRepository> {
    graph: &'g GenealogyGraph<'a, R>,
    places: &'a R,
    config: ChartConfig,
    limit: u32,
    chart: Chart,
}

impl<R> Builder<'_, '_, R>
where
    R: FamilyRepository + PlaceRepository,
    <R as FamilyRepository>::Error: Display,
    <R as PlaceRepository>::Error: Display,
{
    fn ancestors(&mut self, root: &Person) {
        self.add_person(root, 0);

        let mut expanded = HashSet::new();
        let mut queue = VecDeque::from([(root.id, 0u32)]);
        while let Some((id, depth)) = queue.pop_front() {
            if depth >= self.limit || !expanded.insert(id) {
                continue;
            }

            let parents = soften(self.graph.get_parents(id), id);
            for parent in parents.iter() {
                self.add_person(parent, depth as i32 + 1);
                self.chart.insert_edge(ChartEdge::parent_child(parent.id, id));
                queue.push_back((parent.id, depth + 1));
            }
        }
    }

    fn descendants(&mut self, root: &Person) {
        self.add_person(root, 0);

        let mut expanded = HashSet::new();
        let mut queue = VecDeque::from([(root.id, 0u32)]);
        while let Some((id, depth)) = queue.pop_front() {
            if !expanded.insert(id) {
                continue;
            }
            let generation = -(depth as i32);

            for union in soften(self.graph.get_unions_as_spouse(id), id) {
                if let Some(partner) = union.partner_of(id) {
                    if let Some(spouse) = soften(self.graph.person(partner), partner) {
                        self.add_person(&spouse, generation);
                        self.chart.insert_edge(ChartEdge::spouse(id, partner, union.id));
                    }
                }

                if depth >= self.limit {
                    continue;
                }
                for link in soften(self.graph.children_of_union(union.id), id) {
                    let Some(child) = soften(self.graph.person(link.person), link.person) else {
                        continue;
                    };
                    self.add_person(&child, generation - 1);
                    self.chart.insert_edge(ChartEdge::parent_child(id, child.id));
                    queue.push_back((child.id, depth + 1));
                }
            }
        }
    }

    /// Fixed shape: grandparents, parents, siblings, spouses and children
    fn family(&mut self, root: &Person) {
        self.add_person(root, 0);

        let parents = soften(self.graph.get_parents(root.id), root.id);
        for parent in parents.iter() {
            self.add_person(parent, 1);
            self.chart.insert_edge(ChartEdge::parent_child(parent.id, root.id));

            let grandparents = soften(self.graph.get_parents(parent.id), parent.id);
            for grandparent in grandparents.iter() {
                self.add_person(grandparent, 2);
                self.chart.insert_edge(ChartEdge::parent_child(grandparent.id, parent.id));
            }
        }

        for sibling in soften(self.graph.get_siblings(root.id), root.id) {
            self.add_person(&sibling, 0);
            for parent in parents.iter() {
                self.chart.insert_edge(ChartEdge::parent_child(parent.id, sibling.id));
            }
        }

        for union in soften(self.graph.get_unions_as_spouse(root.id), root.id) {
            if let Some(partner) = union.partner_of(root.id) {
                if let Some(spouse) = soften(self.graph.person(partner), partner) {
                    self.add_person(&spouse, 0);
                    self.chart.insert_edge(ChartEdge::spouse(root.id, partner, union.id));
                }
            }
            for link in soften(self.graph.children_of_union(union.id), root.id) {
                if let Some(child) = soften(self.graph.person(link.person), link.person) {
                    self.add_person(&child, -1);
                    self.chart.insert_edge(ChartEdge::parent_child(root.id, child.id));
                }
            }
        }
    }

    fn add_person(&mut self, person: &Person, generation: i32) -> bool {
        if self.chart.contains(person.id) {
            return false;
        }
        let node = self.node(person, generation);
        self.chart.insert_node(node)
    }

    fn node(&self, person: &Person, generation: i32) -> ChartNode {
        let mut node = ChartNode {
            id: person.id,
            uuid: person.uuid,
            name: person.display_name(NameFormat::Short),
            full_name: person.display_name(NameFormat::Full),
            gender: person.gender,
            generation,
            order: 0,
            photo: None,
            birth_date: None,
            death_date: None,
            living: None,
            birth_place: None,
            death_place: None,
        };

        if self.config.show_photos {
            node.photo = person.photo_url.clone().filter(|url| !url.trim().is_empty());
        }
        if self.config.show_dates {
            node.birth_date = display_date(person.birth_date.as_ref());
            node.death_date = display_date(person.death_date.as_ref());
            node.living = Some(person.living);
        }
        if self.config.show_places {
            node.birth_place = self.place_name(person.birth_place);
            node.death_place = self.place_name(person.death_place);
        }

        node
    }

    fn place_name(&self, id: Option<PlaceId>) -> Option<String> {
        let id = id?;
        match self.places.get_place(id) {
            Ok(place) => place.map(|p| p.name),
            Err(e) => {
                warn!(place = %id, error = %e, "Place lookup failed");
                None
            }
        }
    }
}

fn display_date(date: Option<&DateValue>) -> Option<String> {
    date.filter(|d| !d.is_empty())
        .map(|d| format_for_display(&d.value, d.calendar, d.approximate))
}

/// Treat a failed lookup as missing data so the chart stops at that link
fn soften<T: Default>(result: lineage_graph::Result<T>, person: PersonId) -> T {
    result.unwrap_or_else(|e| {
        warn!(person = %person, error = %e, "Chart lookup failed");
        T::default()
    })
}
