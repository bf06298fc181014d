//! Life events and person timelines
//!
//! A timeline merges the birth and death on the person record with the
//! person's event records, ordered by the day each happened. Dates in
//! different calendars are compared through their Julian Day Number.

use crate::error::{Result, StoreError};
use crate::memory::InMemoryStore;
use lineage_calendar::day_number;
use lineage_domain::{Event, EventId, EventType, PersonId, TimelineEntry};
use tracing::{debug, info};

impl InMemoryStore {
    /// Record an event, assigning a fresh id
    ///
    /// The person and the place, when given, must exist.
    pub fn create_event(&mut self, mut event: Event) -> Result<EventId> {
        self.check_event_refs(&event)?;

        let id = EventId::new(self.next_event.max(1));
        self.next_event = id.value() + 1;
        event.id = id;
        event.description = event
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        debug!(event = %id, person = %event.person, kind = %event.event_type, "Created event");
        self.events.insert(id, event);
        Ok(id)
    }

    /// Replace an event's attributes
    pub fn update_event(&mut self, event: Event) -> Result<()> {
        if !self.events.contains_key(&event.id) {
            return Err(StoreError::EventNotFound(event.id));
        }
        self.check_event_refs(&event)?;
        self.events.insert(event.id, event);
        Ok(())
    }

    /// Delete an event
    pub fn delete_event(&mut self, id: EventId) -> Result<()> {
        self.events
            .remove(&id)
            .ok_or(StoreError::EventNotFound(id))?;
        info!(event = %id, "Deleted event");
        Ok(())
    }

    /// Look up an event
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// A person's events in id order
    pub fn events_for(&self, person: PersonId) -> impl Iterator<Item = &Event> {
        self.events.values().filter(move |e| e.person == person)
    }

    /// All events in id order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// A person's life in date order
    ///
    /// Birth and death come from the person record when dated. Entries whose
    /// dates no calendar can read go last, keeping their recorded order.
    pub fn timeline(&self, person: PersonId) -> Result<Vec<TimelineEntry>> {
        let record = self
            .persons
            .get(&person)
            .ok_or(StoreError::PersonNotFound(person))?;

        let mut timeline = Vec::new();
        if let Some(birth) = record.birth_date.clone().filter(|d| !d.is_empty()) {
            timeline.push(TimelineEntry::vital(EventType::Birth, birth, record.birth_place));
        }
        timeline.extend(self.events_for(person).map(TimelineEntry::from));
        if let Some(death) = record.death_date.clone().filter(|d| !d.is_empty()) {
            timeline.push(TimelineEntry::vital(EventType::Death, death, record.death_place));
        }

        timeline.sort_by_cached_key(|entry| {
            let day = entry
                .date
                .as_ref()
                .and_then(|d| day_number(&d.value, d.calendar));
            (day.is_none(), day)
        });
        Ok(timeline)
    }

    fn check_event_refs(&self, event: &Event) -> Result<()> {
        if !self.persons.contains_key(&event.person) {
            return Err(StoreError::PersonNotFound(event.person));
        }
        if let Some(place) = event.place {
            if !self.places.contains_key(&place) {
                return Err(StoreError::PlaceNotFound(place));
            }
        }
        Ok(())
    }
}
