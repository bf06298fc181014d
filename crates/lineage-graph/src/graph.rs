//! Request-scoped family graph

use crate::error::{GraphError, Result};
use lineage_domain::traits::FamilyRepository;
use lineage_domain::{ChildLink, Gender, Person, PersonId, RelationshipEdge, Union, UnionId};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use tracing::{debug, warn};

/// Upper bound on any generation walk, whatever the caller asks for
pub const MAX_GENERATIONS: u32 = 25;

/// A person's parents, resolved by gender
///
/// A second parent whose gender matches the first (two mothers, or two
/// parents with no recorded gender) has no slot of its own and is kept in
/// `other`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parents {
    /// Father, if known
    pub father: Option<Person>,
    /// Mother, if known
    pub mother: Option<Person>,
    /// Parent that fits neither slot
    pub other: Option<Person>,
}

impl Parents {
    /// Whether no parent is known
    pub fn is_empty(&self) -> bool {
        self.father.is_none() && self.mother.is_none() && self.other.is_none()
    }

    /// Known parents: father, mother, then the other parent
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.father
            .iter()
            .chain(self.mother.iter())
            .chain(self.other.iter())
    }
}

#[derive(Default)]
struct Cache {
    persons: HashMap<PersonId, Option<Person>>,
    unions_by_spouse: HashMap<PersonId, Vec<Union>>,
    union_as_child: HashMap<PersonId, Option<Union>>,
    children: HashMap<UnionId, Vec<ChildLink>>,
    edges: HashMap<PersonId, Vec<RelationshipEdge>>,
}

/// Family queries over a repository, memoized for one request
///
/// The graph never writes to the repository. Lookups go through targeted
/// repository calls; each answer is cached for the lifetime of the graph.
///
/// # Examples
///
/// ```
/// use lineage_graph::GenealogyGraph;
/// use lineage_store::InMemoryStore;
/// use lineage_domain::PersonId;
///
/// let store = InMemoryStore::new();
/// let graph = GenealogyGraph::new(&store);
/// assert!(graph.get_parents(PersonId::new(1)).is_err());
/// ```
pub struct GenealogyGraph<'a, R: FamilyRepository> {
    repo: &'a R,
    cache: RefCell<Cache>,
}

impl<'a, R> GenealogyGraph<'a, R>
where
    R: FamilyRepository,
    R::Error: Display,
{
    /// Wrap a repository for one request
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            cache: RefCell::new(Cache::default()),
        }
    }

    /// The wrapped repository
    pub fn repository(&self) -> &'a R {
        self.repo
    }

    /// Look up a person, `None` when unknown
    pub fn person(&self, id: PersonId) -> Result<Option<Person>> {
        if let Some(cached) = self.cache.borrow().persons.get(&id) {
            return Ok(cached.clone());
        }
        let person = self.repo.get_person(id).map_err(store_error)?;
        self.cache.borrow_mut().persons.insert(id, person.clone());
        Ok(person)
    }

    /// Look up a person, failing with [`GraphError::NotFound`] when unknown
    pub fn require_person(&self, id: PersonId) -> Result<Person> {
        self.person(id)?.ok_or(GraphError::NotFound(id))
    }

    /// Unions in which the person is a spouse, in union id order
    pub fn get_unions_as_spouse(&self, id: PersonId) -> Result<Vec<Union>> {
        self.require_person(id)?;
        if let Some(cached) = self.cache.borrow().unions_by_spouse.get(&id) {
            return Ok(cached.clone());
        }
        let mut unions = self.repo.get_unions_by_spouse(id).map_err(store_error)?;
        unions.sort_by_key(|u| u.id);
        self.cache.borrow_mut().unions_by_spouse.insert(id, unions.clone());
        Ok(unions)
    }

    /// The union the person was born or adopted into
    pub fn get_union_as_child(&self, id: PersonId) -> Result<Option<Union>> {
        self.require_person(id)?;
        if let Some(cached) = self.cache.borrow().union_as_child.get(&id) {
            return Ok(cached.clone());
        }
        let union = self.repo.get_union_as_child(id).map_err(store_error)?;
        self.cache.borrow_mut().union_as_child.insert(id, union.clone());
        Ok(union)
    }

    /// Child links of a union, in birth order
    pub fn children_of_union(&self, union: UnionId) -> Result<Vec<ChildLink>> {
        if let Some(cached) = self.cache.borrow().children.get(&union) {
            return Ok(cached.clone());
        }
        let children = self.repo.get_children_of_union(union).map_err(store_error)?;
        self.cache.borrow_mut().children.insert(union, children.clone());
        Ok(children)
    }

    /// Every edge touching the person
    pub fn edges(&self, id: PersonId) -> Result<Vec<RelationshipEdge>> {
        if let Some(cached) = self.cache.borrow().edges.get(&id) {
            return Ok(cached.clone());
        }
        let edges = self.repo.get_edges(id).map_err(store_error)?;
        self.cache.borrow_mut().edges.insert(id, edges.clone());
        Ok(edges)
    }

    /// Father and mother from the union the person was born into
    ///
    /// Slots are filled by gender: spouse1 becomes the father when male and
    /// the mother otherwise; spouse2 becomes the father when male and the
    /// father slot is still free, else the mother when that slot is free.
    /// A spouse2 left without a slot becomes `other`, so both spouses of a
    /// union are always returned.
    pub fn get_parents(&self, id: PersonId) -> Result<Parents> {
        let mut parents = Parents::default();
        let Some(union) = self.get_union_as_child(id)? else {
            return Ok(parents);
        };

        if let Some(spouse) = self.present_person(union.spouse1)? {
            if spouse.gender == Gender::Male {
                parents.father = Some(spouse);
            } else {
                parents.mother = Some(spouse);
            }
        }
        if let Some(spouse) = self.present_person(union.spouse2)? {
            if spouse.gender == Gender::Male && parents.father.is_none() {
                parents.father = Some(spouse);
            } else if parents.mother.is_none() {
                parents.mother = Some(spouse);
            } else {
                parents.other = Some(spouse);
            }
        }

        Ok(parents)
    }

    /// Children across all of the person's unions
    ///
    /// Ordered by birth order, ties broken by union id; a child listed in
    /// two unions appears once.
    pub fn get_children(&self, id: PersonId) -> Result<Vec<Person>> {
        let mut links: Vec<(u32, UnionId, PersonId)> = Vec::new();
        for union in self.get_unions_as_spouse(id)? {
            for link in self.children_of_union(union.id)? {
                links.push((link.birth_order, union.id, link.person));
            }
        }
        links.sort_by_key(|(order, union, _)| (*order, *union));

        let mut seen = HashSet::new();
        let ids = links
            .into_iter()
            .map(|(_, _, person)| person)
            .filter(|person| seen.insert(*person));
        self.collect_people(ids)
    }

    /// Other children of the union the person was born into, in birth order
    pub fn get_siblings(&self, id: PersonId) -> Result<Vec<Person>> {
        let Some(union) = self.get_union_as_child(id)? else {
            return Ok(Vec::new());
        };
        let ids = self
            .children_of_union(union.id)?
            .into_iter()
            .map(|link| link.person)
            .filter(|person| *person != id);
        self.collect_people(ids)
    }

    /// Partners across all of the person's unions, in union id order
    pub fn get_spouses(&self, id: PersonId) -> Result<Vec<Person>> {
        let mut seen = HashSet::new();
        let ids: Vec<PersonId> = self
            .get_unions_as_spouse(id)?
            .iter()
            .filter_map(|u| u.partner_of(id))
            .filter(|partner| seen.insert(*partner))
            .collect();
        self.collect_people(ids)
    }

    /// Ancestors grouped by generation (1 = parents)
    ///
    /// Walks at most `max_generations` levels, capped at [`MAX_GENERATIONS`].
    /// Each person appears once, at the nearest generation.
    pub fn ancestors(&self, id: PersonId, max_generations: u32) -> Result<BTreeMap<u32, Vec<Person>>> {
        self.generations(id, max_generations, |person| {
            Ok(self.get_parents(person)?.iter().cloned().collect())
        })
    }

    /// Descendants grouped by generation (1 = children)
    ///
    /// Walks at most `max_generations` levels, capped at [`MAX_GENERATIONS`].
    pub fn descendants(&self, id: PersonId, max_generations: u32) -> Result<BTreeMap<u32, Vec<Person>>> {
        self.generations(id, max_generations, |person| self.get_children(person))
    }

    fn generations<F>(&self, id: PersonId, max_generations: u32, next: F) -> Result<BTreeMap<u32, Vec<Person>>>
    where
        F: Fn(PersonId) -> Result<Vec<Person>>,
    {
        self.require_person(id)?;
        let limit = max_generations.min(MAX_GENERATIONS);

        let mut visited = HashSet::from([id]);
        let mut levels = BTreeMap::new();
        let mut frontier = vec![id];

        for generation in 1..=limit {
            let mut level = Vec::new();
            for person in &frontier {
                for relative in next(*person)? {
                    if visited.insert(relative.id) {
                        level.push(relative);
                    }
                }
            }
            if level.is_empty() {
                break;
            }
            frontier = level.iter().map(|p| p.id).collect();
            levels.insert(generation, level);
        }

        debug!(person = %id, generations = levels.len(), "Collected generations");
        Ok(levels)
    }

    fn present_person(&self, id: Option<PersonId>) -> Result<Option<Person>> {
        match id {
            Some(id) => self.person(id),
            None => Ok(None),
        }
    }

    /// Fetch people by id, skipping references the repository cannot resolve
    fn collect_people(&self, ids: impl IntoIterator<Item = PersonId>) -> Result<Vec<Person>> {
        let mut people = Vec::new();
        for id in ids {
            match self.person(id)? {
                Some(person) => people.push(person),
                None => warn!(person = %id, "Dangling person reference"),
            }
        }
        Ok(people)
    }
}

fn store_error(e: impl Display) -> GraphError {
    GraphError::Store(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_domain::ChildRelation;
    use lineage_store::InMemoryStore;
    use std::cell::Cell;

    fn add(store: &mut InMemoryStore, first: &str, gender: Gender) -> PersonId {
        store
            .create_person(Person::new(PersonId::new(0), gender).named(first, "Test"))
            .unwrap()
    }

    /// Repository wrapper counting person lookups
    struct Counting<'a> {
        inner: &'a InMemoryStore,
        person_calls: Cell<usize>,
    }

    impl FamilyRepository for Counting<'_> {
        type Error = lineage_store::StoreError;

        fn get_person(&self, id: PersonId) -> lineage_store::Result<Option<Person>> {
            self.person_calls.set(self.person_calls.get() + 1);
            self.inner.get_person(id)
        }
        fn get_union(&self, id: UnionId) -> lineage_store::Result<Option<Union>> {
            self.inner.get_union(id)
        }
        fn get_unions_by_spouse(&self, person: PersonId) -> lineage_store::Result<Vec<Union>> {
            self.inner.get_unions_by_spouse(person)
        }
        fn get_children_of_union(&self, union: UnionId) -> lineage_store::Result<Vec<ChildLink>> {
            self.inner.get_children_of_union(union)
        }
        fn get_union_as_child(&self, person: PersonId) -> lineage_store::Result<Option<Union>> {
            self.inner.get_union_as_child(person)
        }
        fn get_edges(&self, person: PersonId) -> lineage_store::Result<Vec<RelationshipEdge>> {
            self.inner.get_edges(person)
        }
    }

    #[test]
    fn test_parents_resolved_by_gender() {
        let mut store = InMemoryStore::new();
        let mother = add(&mut store, "Mia", Gender::Female);
        let father = add(&mut store, "Max", Gender::Male);
        let child = add(&mut store, "Kid", Gender::Other);
        // Mother listed first
        let union = store.create_union(Some(mother), Some(father)).unwrap();
        store.add_child(union, child, None, ChildRelation::Biological).unwrap();

        let graph = GenealogyGraph::new(&store);
        let parents = graph.get_parents(child).unwrap();
        assert_eq!(parents.father.map(|p| p.id), Some(father));
        assert_eq!(parents.mother.map(|p| p.id), Some(mother));
    }

    #[test]
    fn test_parents_without_gender_fill_first_free_slot() {
        let mut store = InMemoryStore::new();
        let a = add(&mut store, "Ash", Gender::Unknown);
        let b = add(&mut store, "Bay", Gender::Unknown);
        let child = add(&mut store, "Kid", Gender::Male);
        let union = store.create_union(Some(a), Some(b)).unwrap();
        store.add_child(union, child, None, ChildRelation::Biological).unwrap();

        let graph = GenealogyGraph::new(&store);
        let parents = graph.get_parents(child).unwrap();
        assert!(parents.father.is_none());
        assert_eq!(parents.mother.map(|p| p.id), Some(a));
        assert_eq!(parents.other.map(|p| p.id), Some(b));
    }

    #[test]
    fn test_two_mothers_both_returned() {
        let mut store = InMemoryStore::new();
        let ann = add(&mut store, "Ann", Gender::Female);
        let bea = add(&mut store, "Bea", Gender::Female);
        let child = add(&mut store, "Kid", Gender::Female);
        let union = store.create_union(Some(ann), Some(bea)).unwrap();
        store.add_child(union, child, None, ChildRelation::Biological).unwrap();

        let graph = GenealogyGraph::new(&store);
        let parents = graph.get_parents(child).unwrap();
        let ids: Vec<_> = parents.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ann, bea]);
        assert!(parents.father.is_none());

        let ancestors = graph.ancestors(child, 1).unwrap();
        let first: Vec<_> = ancestors[&1].iter().map(|p| p.id).collect();
        assert_eq!(first, vec![ann, bea]);
    }

    #[test]
    fn test_two_fathers_fill_both_slots() {
        let mut store = InMemoryStore::new();
        let a = add(&mut store, "Art", Gender::Male);
        let b = add(&mut store, "Bob", Gender::Male);
        let child = add(&mut store, "Kid", Gender::Male);
        let union = store.create_union(Some(a), Some(b)).unwrap();
        store.add_child(union, child, None, ChildRelation::Adopted).unwrap();

        let graph = GenealogyGraph::new(&store);
        let parents = graph.get_parents(child).unwrap();
        assert_eq!(parents.father.map(|p| p.id), Some(a));
        assert_eq!(parents.mother.map(|p| p.id), Some(b));
    }

    #[test]
    fn test_unknown_person_is_not_found() {
        let store = InMemoryStore::new();
        let graph = GenealogyGraph::new(&store);
        assert_eq!(
            graph.get_children(PersonId::new(7)).unwrap_err(),
            GraphError::NotFound(PersonId::new(7))
        );
        assert!(graph.person(PersonId::new(7)).unwrap().is_none());
    }

    #[test]
    fn test_children_across_unions() {
        let mut store = InMemoryStore::new();
        let p = add(&mut store, "Pat", Gender::Male);
        let first = add(&mut store, "One", Gender::Female);
        let second = add(&mut store, "Two", Gender::Female);
        let a = add(&mut store, "A", Gender::Male);
        let b = add(&mut store, "B", Gender::Female);
        let c = add(&mut store, "C", Gender::Male);

        let u1 = store.create_union(Some(p), Some(first)).unwrap();
        let u2 = store.create_union(Some(p), Some(second)).unwrap();
        store.add_child(u1, a, Some(1), ChildRelation::Biological).unwrap();
        store.add_child(u2, b, Some(0), ChildRelation::Biological).unwrap();
        store.add_child(u2, c, Some(1), ChildRelation::Biological).unwrap();

        let graph = GenealogyGraph::new(&store);
        let children: Vec<_> = graph.get_children(p).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(children, vec![b, a, c]);

        let spouses: Vec<_> = graph.get_spouses(p).unwrap().iter().map(|s| s.id).collect();
        assert_eq!(spouses, vec![first, second]);
        assert_eq!(graph.get_unions_as_spouse(p).unwrap().len(), 2);
    }

    #[test]
    fn test_siblings_exclude_self() {
        let mut store = InMemoryStore::new();
        let m = add(&mut store, "Mom", Gender::Female);
        let kids: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|n| add(&mut store, n, Gender::Female))
            .collect();
        let u = store.create_union(Some(m), None).unwrap();
        for kid in &kids {
            store.add_child(u, *kid, None, ChildRelation::Biological).unwrap();
        }

        let graph = GenealogyGraph::new(&store);
        let siblings: Vec<_> = graph.get_siblings(kids[1]).unwrap().iter().map(|s| s.id).collect();
        assert_eq!(siblings, vec![kids[0], kids[2]]);
        assert!(graph.get_siblings(m).unwrap().is_empty());
    }

    #[test]
    fn test_ancestors_by_generation() {
        let mut store = InMemoryStore::new();
        let gf = add(&mut store, "Gramps", Gender::Male);
        let dad = add(&mut store, "Dad", Gender::Male);
        let mom = add(&mut store, "Mom", Gender::Female);
        let kid = add(&mut store, "Kid", Gender::Female);

        let u0 = store.create_union(Some(gf), None).unwrap();
        store.add_child(u0, dad, None, ChildRelation::Biological).unwrap();
        let u1 = store.create_union(Some(dad), Some(mom)).unwrap();
        store.add_child(u1, kid, None, ChildRelation::Biological).unwrap();

        let graph = GenealogyGraph::new(&store);
        let ancestors = graph.ancestors(kid, 5).unwrap();
        let ids = |g: u32| ancestors[&g].iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(1), vec![dad, mom]);
        assert_eq!(ids(2), vec![gf]);
        assert_eq!(ancestors.len(), 2);

        assert_eq!(graph.ancestors(kid, 1).unwrap().len(), 1);
        assert!(graph.ancestors(kid, 0).unwrap().is_empty());

        let descendants = graph.descendants(gf, 5).unwrap();
        assert_eq!(descendants[&1][0].id, dad);
        assert_eq!(descendants[&2][0].id, kid);
    }

    #[test]
    fn test_lookups_are_cached_per_graph() {
        let mut store = InMemoryStore::new();
        let m = add(&mut store, "Mom", Gender::Female);
        let kid = add(&mut store, "Kid", Gender::Male);
        let u = store.create_union(Some(m), None).unwrap();
        store.add_child(u, kid, None, ChildRelation::Biological).unwrap();

        let counting = Counting {
            inner: &store,
            person_calls: Cell::new(0),
        };
        let graph = GenealogyGraph::new(&counting);
        graph.get_parents(kid).unwrap();
        let after_first = counting.person_calls.get();
        graph.get_parents(kid).unwrap();
        graph.get_siblings(kid).unwrap();
        assert_eq!(counting.person_calls.get(), after_first);

        // A fresh graph starts with an empty cache
        let graph = GenealogyGraph::new(&counting);
        graph.get_parents(kid).unwrap();
        assert_eq!(counting.person_calls.get(), after_first * 2);
    }
}
