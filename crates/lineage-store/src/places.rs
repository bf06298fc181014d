//! Place deduplication and place queries
//!
//! Places are keyed by [`normalize_place_name`], so "New York, NY, USA" and
//! "new york,ny,usa" resolve to the same record.

use crate::error::{Result, StoreError};
use crate::memory::InMemoryStore;
use lineage_domain::traits::PlaceRepository;
use lineage_domain::{normalize_place_name, Person, PersonId, Place, PlaceContext, PlaceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Counts of events recorded at a place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceStats {
    /// People born there
    pub births: usize,
    /// People who died there
    pub deaths: usize,
    /// Unions married there
    pub marriages: usize,
    /// Distinct people linked to the place in any context
    pub total_people: usize,
}

impl InMemoryStore {
    /// Find a place by free-text name using its normalized key
    pub fn find_place_by_name(&self, name: &str) -> Option<&Place> {
        self.place_keys
            .get(&normalize_place_name(name))
            .and_then(|id| self.places.get(id))
    }

    /// All places in id order
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    /// Rename a place or set its coordinates
    ///
    /// Fails when the new name collides with another place's key.
    pub fn update_place(&mut self, mut place: Place) -> Result<()> {
        let existing = self
            .places
            .get(&place.id)
            .ok_or(StoreError::PlaceNotFound(place.id))?;

        let renamed = Place::from_name(place.id, &place.name);
        if renamed.normalized_name.is_empty() {
            return Err(StoreError::InvalidInput("Place name is empty".to_string()));
        }
        if let Some(other) = self.place_keys.get(&renamed.normalized_name) {
            if *other != place.id {
                return Err(StoreError::DuplicatePlace(renamed.normalized_name));
            }
        }

        let old_key = existing.normalized_name.clone();
        place.name = renamed.name;
        place.normalized_name = renamed.normalized_name;
        place.components = renamed.components;

        self.place_keys.remove(&old_key);
        self.place_keys.insert(place.normalized_name.clone(), place.id);
        self.places.insert(place.id, place);
        Ok(())
    }

    /// Delete a place nobody refers to
    pub fn delete_place(&mut self, id: PlaceId) -> Result<()> {
        if !self.places.contains_key(&id) {
            return Err(StoreError::PlaceNotFound(id));
        }
        if self.place_in_use(id) {
            return Err(StoreError::PlaceInUse(id));
        }

        if let Some(place) = self.places.remove(&id) {
            self.place_keys.remove(&place.normalized_name);
        }
        info!(place = %id, "Deleted place");
        Ok(())
    }

    /// Re-point every reference to `merge` at `keep`, then delete `merge`
    ///
    /// Returns the number of references moved.
    pub fn merge_places(&mut self, keep: PlaceId, merge: PlaceId) -> Result<usize> {
        if keep == merge {
            return Err(StoreError::InvalidInput(
                "Cannot merge a place into itself".to_string(),
            ));
        }
        for id in [keep, merge] {
            if !self.places.contains_key(&id) {
                return Err(StoreError::PlaceNotFound(id));
            }
        }

        let mut moved = 0;
        let mut touched = Vec::new();
        for person in self.persons.values_mut() {
            let mut changed = false;
            if person.birth_place == Some(merge) {
                person.birth_place = Some(keep);
                changed = true;
                moved += 1;
            }
            if person.death_place == Some(merge) {
                person.death_place = Some(keep);
                changed = true;
                moved += 1;
            }
            if changed {
                touched.push(person.id);
            }
        }
        for union in self.unions.values_mut() {
            if union.marriage_place == Some(merge) {
                union.marriage_place = Some(keep);
                moved += 1;
            }
        }
        for event in self.events.values_mut() {
            if event.place == Some(merge) {
                event.place = Some(keep);
                moved += 1;
            }
        }

        for id in touched {
            self.unindex_person_places(id);
            if let Some(person) = self.persons.get(&id).cloned() {
                self.index_person_places(&person);
            }
        }

        if let Some(place) = self.places.remove(&merge) {
            self.place_keys.remove(&place.normalized_name);
        }
        info!(keep = %keep, merged = %merge, moved, "Merged places");
        Ok(moved)
    }

    /// People linked to a place, ordered by surname, first name, then id
    ///
    /// With a context only that link kind counts. Marriage links cover both
    /// spouses of unions married at the place.
    pub fn people_at_place(
        &self,
        place: PlaceId,
        context: Option<PlaceContext>,
    ) -> Result<Vec<(Person, PlaceContext)>> {
        if !self.places.contains_key(&place) {
            return Err(StoreError::PlaceNotFound(place));
        }

        let mut links: BTreeSet<(PersonId, PlaceContext)> = self
            .place_index
            .get(&place)
            .cloned()
            .unwrap_or_default();
        for union in self.unions.values() {
            if union.marriage_place == Some(place) {
                links.extend(union.spouses().map(|s| (s, PlaceContext::Marriage)));
            }
        }

        let mut people: Vec<(Person, PlaceContext)> = links
            .into_iter()
            .filter(|(_, ctx)| context.is_none_or(|wanted| wanted == *ctx))
            .filter_map(|(id, ctx)| self.persons.get(&id).map(|p| (p.clone(), ctx)))
            .collect();

        people.sort_by(|(a, _), (b, _)| {
            (&a.surname, &a.first_name, a.id).cmp(&(&b.surname, &b.first_name, b.id))
        });
        Ok(people)
    }

    /// Birth, death and marriage counts for a place
    pub fn place_stats(&self, place: PlaceId) -> Result<PlaceStats> {
        let links = self.people_at_place(place, None)?;

        let births = links.iter().filter(|(_, c)| *c == PlaceContext::Birth).count();
        let deaths = links.iter().filter(|(_, c)| *c == PlaceContext::Death).count();
        let marriages = self
            .unions
            .values()
            .filter(|u| u.marriage_place == Some(place))
            .count();
        let total_people = links
            .iter()
            .map(|(p, _)| p.id)
            .collect::<BTreeSet<_>>()
            .len();

        Ok(PlaceStats {
            births,
            deaths,
            marriages,
            total_people,
        })
    }

    fn place_in_use(&self, id: PlaceId) -> bool {
        self.persons
            .values()
            .any(|p| p.birth_place == Some(id) || p.death_place == Some(id))
            || self.unions.values().any(|u| u.marriage_place == Some(id))
            || self.events.values().any(|e| e.place == Some(id))
    }

    /// Insert a place under the next free id
    pub(crate) fn insert_place(&mut self, mut place: Place) -> Place {
        let id = PlaceId::new(self.next_place.max(1));
        self.next_place = id.value() + 1;
        place.id = id;

        self.place_keys.insert(place.normalized_name.clone(), id);
        self.places.insert(id, place.clone());
        debug!(place = %id, key = %place.normalized_name, "Created place");
        place
    }
}

impl PlaceRepository for InMemoryStore {
    type Error = StoreError;

    fn get_or_create_place(&mut self, name: &str) -> Result<Place> {
        let key = normalize_place_name(name);
        if key.is_empty() {
            return Err(StoreError::InvalidInput("Place name is empty".to_string()));
        }
        if let Some(existing) = self.place_keys.get(&key).and_then(|id| self.places.get(id)) {
            return Ok(existing.clone());
        }

        Ok(self.insert_place(Place::from_name(PlaceId::new(0), name)))
    }

    fn get_place(&self, id: PlaceId) -> Result<Option<Place>> {
        Ok(self.places.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_domain::Gender;

    fn born_at(store: &mut InMemoryStore, first: &str, surname: &str, place: PlaceId) -> PersonId {
        let mut person = Person::new(PersonId::new(0), Gender::Unknown).named(first, surname);
        person.birth_place = Some(place);
        store.create_person(person).unwrap()
    }

    #[test]
    fn test_get_or_create_dedups_spellings() {
        let mut store = InMemoryStore::new();
        let a = store.get_or_create_place("New York, NY, USA").unwrap();
        let b = store.get_or_create_place("  new york,ny,usa ").unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, "New York, NY, USA");
        assert_eq!(a.components.city.as_deref(), Some("New York"));
        assert_eq!(store.places().count(), 1);
    }

    #[test]
    fn test_empty_place_name_rejected() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.get_or_create_place(" ,  "),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_find_place_by_name() {
        let mut store = InMemoryStore::new();
        let place = store.get_or_create_place("Vilnius, Lithuania").unwrap();
        assert_eq!(store.find_place_by_name("VILNIUS,  lithuania").map(|p| p.id), Some(place.id));
        assert!(store.find_place_by_name("Kaunas").is_none());
    }

    #[test]
    fn test_update_place_collision() {
        let mut store = InMemoryStore::new();
        let a = store.get_or_create_place("Boston").unwrap();
        let b = store.get_or_create_place("Salem").unwrap();

        let mut renamed = b.clone();
        renamed.name = "BOSTON".to_string();
        assert!(matches!(store.update_place(renamed), Err(StoreError::DuplicatePlace(_))));

        let mut renamed = b;
        renamed.name = "Salem, Massachusetts".to_string();
        renamed.latitude = Some(42.5);
        renamed.longitude = Some(-70.9);
        store.update_place(renamed).unwrap();
        assert!(store.find_place_by_name("salem").is_none());
        let salem = store.find_place_by_name("Salem, Massachusetts").unwrap();
        assert_eq!(salem.coordinates(), Some((42.5, -70.9)));
        assert_ne!(salem.id, a.id);
    }

    #[test]
    fn test_delete_place_in_use() {
        let mut store = InMemoryStore::new();
        let used = store.get_or_create_place("Boston").unwrap().id;
        let unused = store.get_or_create_place("Salem").unwrap().id;
        born_at(&mut store, "Ann", "Test", used);

        assert!(matches!(store.delete_place(used), Err(StoreError::PlaceInUse(_))));
        store.delete_place(unused).unwrap();
        assert!(store.get_place(unused).unwrap().is_none());
    }

    #[test]
    fn test_create_person_with_unknown_place() {
        let mut store = InMemoryStore::new();
        let mut person = Person::new(PersonId::new(0), Gender::Male);
        person.birth_place = Some(PlaceId::new(42));
        assert!(matches!(store.create_person(person), Err(StoreError::PlaceNotFound(_))));
    }

    #[test]
    fn test_merge_places() {
        let mut store = InMemoryStore::new();
        let keep = store.get_or_create_place("Boston").unwrap().id;
        let merge = store.get_or_create_place("Boston, MA").unwrap().id;
        let a = born_at(&mut store, "Ann", "Test", merge);
        let b = born_at(&mut store, "Ben", "Test", keep);
        let u = store.create_union(Some(a), Some(b)).unwrap();
        let mut union = store.union(u).unwrap().clone();
        union.marriage_place = Some(merge);
        store.update_union(union).unwrap();

        assert_eq!(store.merge_places(keep, merge).unwrap(), 2);
        assert!(store.get_place(merge).unwrap().is_none());
        assert_eq!(store.person(a).unwrap().birth_place, Some(keep));
        assert_eq!(store.union(u).unwrap().marriage_place, Some(keep));

        let stats = store.place_stats(keep).unwrap();
        assert_eq!(stats.births, 2);
        assert_eq!(stats.marriages, 1);
        assert_eq!(stats.total_people, 2);
    }

    #[test]
    fn test_people_at_place_ordering_and_filter() {
        let mut store = InMemoryStore::new();
        let place = store.get_or_create_place("Lviv").unwrap().id;
        let zed = born_at(&mut store, "Zed", "Adler", place);
        let amy = born_at(&mut store, "Amy", "Adler", place);
        let bob = born_at(&mut store, "Bob", "Brand", place);

        let mut died_there = store.person(bob).unwrap().clone();
        died_there.death_place = Some(place);
        store.update_person(died_there).unwrap();

        let births: Vec<_> = store
            .people_at_place(place, Some(PlaceContext::Birth))
            .unwrap()
            .into_iter()
            .map(|(p, _)| p.id)
            .collect();
        assert_eq!(births, vec![amy, zed, bob]);

        let deaths = store.people_at_place(place, Some(PlaceContext::Death)).unwrap();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].0.id, bob);

        let stats = store.place_stats(place).unwrap();
        assert_eq!(stats.births, 3);
        assert_eq!(stats.deaths, 1);
        assert_eq!(stats.total_people, 3);

        assert!(matches!(
            store.people_at_place(PlaceId::new(99), None),
            Err(StoreError::PlaceNotFound(_))
        ));
    }
}
