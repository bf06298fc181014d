//! In-memory family store
//!
//! Holds people, unions and places in ordered maps so every listing comes out
//! in id order. Relationship edges are derived from unions and regenerated
//! whenever a union's spouses or children change.

use crate::error::{Result, StoreError};
use lineage_calendar::day_number;
use lineage_domain::traits::FamilyRepository;
use lineage_domain::{
    ChildLink, ChildRelation, Event, EventId, Person, PersonId, Place, PlaceContext, PlaceId,
    RelationshipEdge, Union, UnionId,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// In-memory implementation of the family and place repositories
///
/// Used as the reference collaborator for the engines, the CLI and tests.
/// Not thread-safe for writers; wrap it in a lock to share between threads.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(crate) persons: BTreeMap<PersonId, Person>,
    pub(crate) unions: BTreeMap<UnionId, Union>,
    pub(crate) places: BTreeMap<PlaceId, Place>,
    pub(crate) events: BTreeMap<EventId, Event>,
    pub(crate) place_keys: HashMap<String, PlaceId>,
    /// Birth/death place index
    pub(crate) place_index: BTreeMap<PlaceId, BTreeSet<(PersonId, PlaceContext)>>,
    /// Edges grouped by owning union
    pub(crate) edges: BTreeMap<UnionId, Vec<RelationshipEdge>>,
    pub(crate) next_person: u64,
    pub(crate) next_union: u64,
    pub(crate) next_place: u64,
    pub(crate) next_event: u64,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            next_person: 1,
            next_union: 1,
            next_place: 1,
            next_event: 1,
            ..Self::default()
        }
    }

    // ---- people -------------------------------------------------------

    /// Insert a person, assigning a fresh id
    ///
    /// The `id` on the passed record is ignored. Names are trimmed and the
    /// birth/death places must already exist.
    pub fn create_person(&mut self, mut person: Person) -> Result<PersonId> {
        self.check_person_places(&person)?;

        let id = PersonId::new(self.next_person.max(1));
        self.next_person = id.value() + 1;

        person.id = id;
        person.normalize_names();
        self.index_person_places(&person);
        self.persons.insert(id, person);

        debug!(person = %id, "Created person");
        Ok(id)
    }

    /// Replace a person's attributes
    ///
    /// The id and uuid are kept; names are re-normalized and the place index
    /// rebuilt for this person.
    pub fn update_person(&mut self, mut person: Person) -> Result<()> {
        let existing = self
            .persons
            .get(&person.id)
            .ok_or(StoreError::PersonNotFound(person.id))?;
        self.check_person_places(&person)?;

        person.uuid = existing.uuid;
        person.normalize_names();

        self.unindex_person_places(person.id);
        self.index_person_places(&person);

        // Birth dates are a child-ordering tiebreaker
        let unions: Vec<UnionId> = self
            .unions
            .values()
            .filter(|u| u.has_child(person.id))
            .map(|u| u.id)
            .collect();

        self.persons.insert(person.id, person);
        for union in unions {
            self.sort_children(union);
        }
        Ok(())
    }

    /// Delete a person who has no relationships, along with their events
    pub fn delete_person(&mut self, id: PersonId) -> Result<()> {
        if !self.persons.contains_key(&id) {
            return Err(StoreError::PersonNotFound(id));
        }

        let in_union = self
            .unions
            .values()
            .any(|u| u.has_spouse(id) || u.has_child(id));
        let has_edges = self.edges.values().flatten().any(|e| e.involves(id));
        if in_union || has_edges {
            return Err(StoreError::HasRelationships(id));
        }

        self.unindex_person_places(id);
        self.events.retain(|_, e| e.person != id);
        self.persons.remove(&id);
        info!(person = %id, "Deleted person");
        Ok(())
    }

    /// Look up a person
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    /// Look up a person by public uuid
    pub fn person_by_uuid(&self, uuid: &uuid::Uuid) -> Option<&Person> {
        self.persons.values().find(|p| &p.uuid == uuid)
    }

    /// All people in id order
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// Number of people
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    fn check_person_places(&self, person: &Person) -> Result<()> {
        for (place, _) in person.place_refs() {
            if !self.places.contains_key(&place) {
                return Err(StoreError::PlaceNotFound(place));
            }
        }
        Ok(())
    }

    pub(crate) fn index_person_places(&mut self, person: &Person) {
        for (place, context) in person.place_refs() {
            self.place_index
                .entry(place)
                .or_default()
                .insert((person.id, context));
        }
    }

    pub(crate) fn unindex_person_places(&mut self, id: PersonId) {
        for entries in self.place_index.values_mut() {
            entries.retain(|(person, _)| *person != id);
        }
        self.place_index.retain(|_, entries| !entries.is_empty());
    }

    // ---- unions -------------------------------------------------------

    /// Create a union between up to two people
    pub fn create_union(
        &mut self,
        spouse1: Option<PersonId>,
        spouse2: Option<PersonId>,
    ) -> Result<UnionId> {
        self.check_spouses(spouse1, spouse2)?;
        if let Some(existing) = self.find_union(spouse1, spouse2) {
            return Err(StoreError::DuplicateUnion(existing));
        }

        let id = UnionId::new(self.next_union.max(1));
        self.next_union = id.value() + 1;

        self.unions.insert(id, Union::new(id, spouse1, spouse2));
        self.rebuild_union_edges(id);
        debug!(union = %id, "Created union");
        Ok(id)
    }

    /// Return the union joining the unordered pair, creating it if absent
    pub fn find_or_create_union(
        &mut self,
        spouse1: Option<PersonId>,
        spouse2: Option<PersonId>,
    ) -> Result<UnionId> {
        match self.find_union(spouse1, spouse2) {
            Some(id) => Ok(id),
            None => self.create_union(spouse1, spouse2),
        }
    }

    /// The union joining exactly this unordered pair, if any
    pub fn find_union(&self, spouse1: Option<PersonId>, spouse2: Option<PersonId>) -> Option<UnionId> {
        self.unions
            .values()
            .find(|u| u.joins(spouse1, spouse2))
            .map(|u| u.id)
    }

    /// Replace a union's spouses, dates, place and status
    ///
    /// Children are managed through [`Self::add_child`] and friends; the
    /// children on the passed record are ignored.
    pub fn update_union(&mut self, mut union: Union) -> Result<()> {
        let existing = self
            .unions
            .get(&union.id)
            .ok_or(StoreError::UnionNotFound(union.id))?;
        self.check_spouses(union.spouse1, union.spouse2)?;

        if let Some(other) = self.find_union(union.spouse1, union.spouse2) {
            if other != union.id {
                return Err(StoreError::DuplicateUnion(other));
            }
        }
        if let Some(place) = union.marriage_place {
            if !self.places.contains_key(&place) {
                return Err(StoreError::PlaceNotFound(place));
            }
        }
        union.uuid = existing.uuid;
        union.children = existing.children.clone();
        if union.children.iter().any(|c| union.has_spouse(c.person)) {
            return Err(StoreError::InvalidInput(
                "A spouse cannot also be a child of the same union".to_string(),
            ));
        }

        let id = union.id;
        self.unions.insert(id, union);
        self.rebuild_union_edges(id);
        Ok(())
    }

    /// Delete a union together with its child links and edges
    pub fn delete_union(&mut self, id: UnionId) -> Result<()> {
        self.unions.remove(&id).ok_or(StoreError::UnionNotFound(id))?;
        self.edges.remove(&id);
        info!(union = %id, "Deleted union");
        Ok(())
    }

    /// Look up a union
    pub fn union(&self, id: UnionId) -> Option<&Union> {
        self.unions.get(&id)
    }

    /// All unions in id order
    pub fn unions(&self) -> impl Iterator<Item = &Union> {
        self.unions.values()
    }

    /// Add a child to a union
    ///
    /// Without a birth order the child goes after the existing children.
    /// Parent-child edges are created from each spouse.
    pub fn add_child(
        &mut self,
        union_id: UnionId,
        person: PersonId,
        birth_order: Option<u32>,
        relation: ChildRelation,
    ) -> Result<()> {
        if !self.persons.contains_key(&person) {
            return Err(StoreError::PersonNotFound(person));
        }
        let union = self
            .unions
            .get_mut(&union_id)
            .ok_or(StoreError::UnionNotFound(union_id))?;

        if union.has_child(person) {
            return Err(StoreError::DuplicateChild {
                union: union_id,
                person,
            });
        }
        if union.has_spouse(person) {
            return Err(StoreError::InvalidInput(format!(
                "Person {} is a spouse in union {} and cannot be its child",
                person, union_id
            )));
        }

        let birth_order = birth_order.unwrap_or_else(|| {
            union
                .children
                .iter()
                .map(|c| c.birth_order + 1)
                .max()
                .unwrap_or(0)
        });
        union.children.push(ChildLink {
            person,
            birth_order,
            relation,
        });

        self.sort_children(union_id);
        self.rebuild_union_edges(union_id);
        debug!(union = %union_id, child = %person, "Added child");
        Ok(())
    }

    /// Remove a child from a union, dropping the parent-child edges
    pub fn remove_child(&mut self, union_id: UnionId, person: PersonId) -> Result<()> {
        let union = self
            .unions
            .get_mut(&union_id)
            .ok_or(StoreError::UnionNotFound(union_id))?;

        let before = union.children.len();
        union.children.retain(|c| c.person != person);
        if union.children.len() == before {
            return Err(StoreError::NotAChild {
                union: union_id,
                person,
            });
        }

        self.rebuild_union_edges(union_id);
        Ok(())
    }

    /// Set birth orders from a list of child ids (position = birth order)
    ///
    /// Children not listed keep their current birth order.
    pub fn reorder_children(&mut self, union_id: UnionId, order: &[PersonId]) -> Result<()> {
        let union = self
            .unions
            .get_mut(&union_id)
            .ok_or(StoreError::UnionNotFound(union_id))?;

        if let Some(missing) = order.iter().find(|p| !union.has_child(**p)) {
            return Err(StoreError::NotAChild {
                union: union_id,
                person: *missing,
            });
        }

        for (position, person) in order.iter().enumerate() {
            if let Some(link) = union.children.iter_mut().find(|c| c.person == *person) {
                link.birth_order = position as u32;
            }
        }

        self.sort_children(union_id);
        self.rebuild_union_edges(union_id);
        Ok(())
    }

    fn check_spouses(&self, spouse1: Option<PersonId>, spouse2: Option<PersonId>) -> Result<()> {
        for spouse in spouse1.into_iter().chain(spouse2) {
            if !self.persons.contains_key(&spouse) {
                return Err(StoreError::PersonNotFound(spouse));
            }
        }
        if spouse1.is_some() && spouse1 == spouse2 {
            return Err(StoreError::InvalidInput(
                "A union needs two different spouses".to_string(),
            ));
        }
        Ok(())
    }

    /// Order children by birth order, then birth date, then id
    ///
    /// Birth dates compare by day number so children dated in different
    /// calendars interleave correctly. Undated children, and dates no
    /// calendar can read, come first.
    pub(crate) fn sort_children(&mut self, union_id: UnionId) {
        let persons = &self.persons;
        if let Some(union) = self.unions.get_mut(&union_id) {
            union.children.sort_by_cached_key(|c| {
                let birth = persons
                    .get(&c.person)
                    .and_then(|p| p.birth_date.as_ref())
                    .and_then(|d| day_number(&d.value, d.calendar));
                (c.birth_order, birth, c.person)
            });
        }
    }

    /// Regenerate the spouse and parent-child edges owned by a union
    pub(crate) fn rebuild_union_edges(&mut self, union_id: UnionId) {
        let Some(union) = self.unions.get(&union_id) else {
            self.edges.remove(&union_id);
            return;
        };

        let mut edges = Vec::new();
        if let (Some(a), Some(b)) = (union.spouse1, union.spouse2) {
            edges.push(RelationshipEdge::spouse(a, b, Some(union_id)));
        }
        for child in &union.children {
            for parent in union.spouses() {
                edges.push(RelationshipEdge::parent_child(parent, child.person, Some(union_id)));
            }
        }

        self.edges.insert(union_id, edges);
    }

    /// Every edge in the store, grouped by union id
    pub fn edges(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.edges.values().flatten()
    }
}

impl FamilyRepository for InMemoryStore {
    type Error = StoreError;

    fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
        Ok(self.persons.get(&id).cloned())
    }

    fn get_union(&self, id: UnionId) -> Result<Option<Union>> {
        Ok(self.unions.get(&id).cloned())
    }

    fn get_unions_by_spouse(&self, person: PersonId) -> Result<Vec<Union>> {
        Ok(self
            .unions
            .values()
            .filter(|u| u.has_spouse(person))
            .cloned()
            .collect())
    }

    fn get_children_of_union(&self, union: UnionId) -> Result<Vec<ChildLink>> {
        self.unions
            .get(&union)
            .map(|u| u.children.clone())
            .ok_or(StoreError::UnionNotFound(union))
    }

    fn get_union_as_child(&self, person: PersonId) -> Result<Option<Union>> {
        Ok(self.unions.values().find(|u| u.has_child(person)).cloned())
    }

    fn get_edges(&self, person: PersonId) -> Result<Vec<RelationshipEdge>> {
        Ok(self.edges().filter(|e| e.involves(person)).cloned().collect())
    }
}
