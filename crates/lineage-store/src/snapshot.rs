//! JSON dataset snapshots
//!
//! A snapshot is the serialized form of a whole store: people, unions (with
//! their children), places and life events. Edges, place keys and the place index are
//! derived data and rebuilt on load.

use crate::error::{Result, StoreError};
use crate::memory::InMemoryStore;
use lineage_domain::{normalize_place_name, Event, Person, Place, Union};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Serialized store contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// People
    #[serde(default)]
    pub persons: Vec<Person>,

    /// Unions, children included
    #[serde(default)]
    pub unions: Vec<Union>,

    /// Places
    #[serde(default)]
    pub places: Vec<Place>,

    /// Life events
    #[serde(default)]
    pub events: Vec<Event>,
}

impl InMemoryStore {
    /// Build a store from a snapshot, validating references
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut store = InMemoryStore::new();

        for mut place in snapshot.places {
            if store.places.contains_key(&place.id) {
                return Err(StoreError::InvalidInput(format!("Duplicate place id {}", place.id)));
            }
            place.normalized_name = normalize_place_name(&place.name);
            if store.place_keys.contains_key(&place.normalized_name) {
                return Err(StoreError::DuplicatePlace(place.normalized_name));
            }
            store.place_keys.insert(place.normalized_name.clone(), place.id);
            store.next_place = store.next_place.max(place.id.value() + 1);
            store.places.insert(place.id, place);
        }

        for mut person in snapshot.persons {
            if store.persons.contains_key(&person.id) {
                return Err(StoreError::InvalidInput(format!("Duplicate person id {}", person.id)));
            }
            for (place, _) in person.place_refs() {
                if !store.places.contains_key(&place) {
                    return Err(StoreError::PlaceNotFound(place));
                }
            }
            person.normalize_names();
            store.index_person_places(&person);
            store.next_person = store.next_person.max(person.id.value() + 1);
            store.persons.insert(person.id, person);
        }

        for union in snapshot.unions {
            store.check_snapshot_union(&union)?;
            store.next_union = store.next_union.max(union.id.value() + 1);
            store.unions.insert(union.id, union);
        }

        for event in snapshot.events {
            if store.events.contains_key(&event.id) {
                return Err(StoreError::InvalidInput(format!("Duplicate event id {}", event.id)));
            }
            if !store.persons.contains_key(&event.person) {
                return Err(StoreError::PersonNotFound(event.person));
            }
            if let Some(place) = event.place.filter(|p| !store.places.contains_key(p)) {
                return Err(StoreError::PlaceNotFound(place));
            }
            store.next_event = store.next_event.max(event.id.value() + 1);
            store.events.insert(event.id, event);
        }

        let ids: Vec<_> = store.unions.keys().copied().collect();
        for id in ids {
            store.sort_children(id);
            store.rebuild_union_edges(id);
        }

        info!(
            persons = store.persons.len(),
            unions = store.unions.len(),
            places = store.places.len(),
            events = store.events.len(),
            "Loaded snapshot"
        );
        Ok(store)
    }

    /// Copy the store contents into a snapshot
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            persons: self.persons.values().cloned().collect(),
            unions: self.unions.values().cloned().collect(),
            places: self.places.values().cloned().collect(),
            events: self.events.values().cloned().collect(),
        }
    }

    /// Load a store from a JSON snapshot file
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Self::from_snapshot(snapshot)
    }

    /// Write the store to a JSON snapshot file, creating parent directories
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.to_snapshot())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_snapshot_union(&self, union: &Union) -> Result<()> {
        if self.unions.contains_key(&union.id) {
            return Err(StoreError::InvalidInput(format!("Duplicate union id {}", union.id)));
        }
        for spouse in union.spouses() {
            if !self.persons.contains_key(&spouse) {
                return Err(StoreError::PersonNotFound(spouse));
            }
        }
        if union.spouse1.is_some() && union.spouse1 == union.spouse2 {
            return Err(StoreError::InvalidInput(format!(
                "Union {} lists the same spouse twice",
                union.id
            )));
        }
        if let Some(existing) = self.find_union(union.spouse1, union.spouse2) {
            return Err(StoreError::DuplicateUnion(existing));
        }
        if let Some(place) = union.marriage_place {
            if !self.places.contains_key(&place) {
                return Err(StoreError::PlaceNotFound(place));
            }
        }

        let mut seen = BTreeSet::new();
        for child in &union.children {
            if !self.persons.contains_key(&child.person) {
                return Err(StoreError::PersonNotFound(child.person));
            }
            if union.has_spouse(child.person) {
                return Err(StoreError::InvalidInput(format!(
                    "Person {} is both spouse and child in union {}",
                    child.person, union.id
                )));
            }
            if !seen.insert(child.person) {
                return Err(StoreError::DuplicateChild {
                    union: union.id,
                    person: child.person,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_domain::{ChildLink, EventId, EventType, Gender, PersonId, PlaceId, UnionId};

    fn sample() -> Snapshot {
        let mut ann = Person::new(PersonId::new(1), Gender::Female).named("Ann", "Test");
        ann.birth_place = Some(PlaceId::new(7));
        let ben = Person::new(PersonId::new(2), Gender::Male).named("Ben", "Test");
        let cid = Person::new(PersonId::new(5), Gender::Male).named("Cid", "Test");

        let mut union = Union::new(UnionId::new(3), Some(PersonId::new(1)), Some(PersonId::new(2)));
        union.children.push(ChildLink::new(PersonId::new(5), 0));

        Snapshot {
            persons: vec![ann, ben, cid],
            unions: vec![union],
            places: vec![Place::from_name(PlaceId::new(7), "Boston")],
            events: vec![Event::new(EventId::new(4), PersonId::new(5), EventType::Baptism)],
        }
    }

    #[test]
    fn test_from_snapshot_rebuilds_derived_state() {
        let store = InMemoryStore::from_snapshot(sample()).unwrap();
        assert_eq!(store.edges().count(), 3);
        assert_eq!(store.find_place_by_name("boston").map(|p| p.id), Some(PlaceId::new(7)));
        assert_eq!(store.place_stats(PlaceId::new(7)).unwrap().births, 1);
        assert_eq!(store.next_person, 6);
        assert_eq!(store.next_union, 4);
        assert_eq!(store.next_place, 8);
        assert_eq!(store.next_event, 5);
        assert_eq!(store.events_for(PersonId::new(5)).count(), 1);
    }

    #[test]
    fn test_from_snapshot_rejects_dangling_event() {
        let mut snapshot = sample();
        snapshot.events[0].person = PersonId::new(42);
        assert!(matches!(
            InMemoryStore::from_snapshot(snapshot),
            Err(StoreError::PersonNotFound(_))
        ));

        let mut snapshot = sample();
        snapshot.events[0].place = Some(PlaceId::new(9));
        assert!(matches!(
            InMemoryStore::from_snapshot(snapshot),
            Err(StoreError::PlaceNotFound(_))
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_dangling_child() {
        let mut snapshot = sample();
        snapshot.unions[0].children.push(ChildLink::new(PersonId::new(99), 1));
        assert!(matches!(
            InMemoryStore::from_snapshot(snapshot),
            Err(StoreError::PersonNotFound(_))
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_duplicate_place_keys() {
        let mut snapshot = sample();
        snapshot.places.push(Place::from_name(PlaceId::new(8), "BOSTON"));
        assert!(matches!(
            InMemoryStore::from_snapshot(snapshot),
            Err(StoreError::DuplicatePlace(_))
        ));
    }

    #[test]
    fn test_snapshot_defaults_missing_sections() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        let store = InMemoryStore::from_snapshot(snapshot).unwrap();
        assert_eq!(store.person_count(), 0);
    }
}
