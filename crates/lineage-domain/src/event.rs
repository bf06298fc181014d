//! Event module - dated happenings in a person's life
//!
//! Birth and death live on the person record itself. Everything else a
//! researcher records (a baptism, a census entry, an emigration) is an
//! [`Event`]. A person's timeline merges both into one list.

use crate::{DateValue, EventId, PersonId, PlaceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad grouping of event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Birth, death and disposal of remains
    Vital,
    /// Marriage and divorce
    Family,
    /// Religious rites
    Religious,
    /// Schooling
    Education,
    /// Moving and living somewhere
    Residence,
    /// Legal status
    Legal,
    /// Military service
    Military,
    /// Work life
    Occupation,
    /// Appearances in official records
    Record,
    /// Anything else
    Other,
}

impl EventCategory {
    /// Storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Vital => "vital",
            EventCategory::Family => "family",
            EventCategory::Religious => "religious",
            EventCategory::Education => "education",
            EventCategory::Residence => "residence",
            EventCategory::Legal => "legal",
            EventCategory::Military => "military",
            EventCategory::Occupation => "occupation",
            EventCategory::Record => "record",
            EventCategory::Other => "other",
        }
    }
}

/// Kind of life event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Birth
    Birth,
    /// Death
    Death,
    /// Marriage
    Marriage,
    /// Divorce
    Divorce,
    /// Baptism
    Baptism,
    /// Christening
    Christening,
    /// Bar mitzvah
    BarMitzvah,
    /// Bat mitzvah
    BatMitzvah,
    /// Confirmation
    Confirmation,
    /// First communion
    FirstCommunion,
    /// Graduation
    Graduation,
    /// Immigration
    Immigration,
    /// Emigration
    Emigration,
    /// Naturalization
    Naturalization,
    /// Military service
    MilitaryService,
    /// Retirement
    Retirement,
    /// Burial
    Burial,
    /// Cremation
    Cremation,
    /// Residence
    Residence,
    /// Occupation
    Occupation,
    /// Census entry
    Census,
    /// Anything not covered above
    #[default]
    Other,
}

impl EventType {
    /// Every event type, in display order
    pub const ALL: [EventType; 22] = [
        EventType::Birth,
        EventType::Death,
        EventType::Marriage,
        EventType::Divorce,
        EventType::Baptism,
        EventType::Christening,
        EventType::BarMitzvah,
        EventType::BatMitzvah,
        EventType::Confirmation,
        EventType::FirstCommunion,
        EventType::Graduation,
        EventType::Immigration,
        EventType::Emigration,
        EventType::Naturalization,
        EventType::MilitaryService,
        EventType::Retirement,
        EventType::Burial,
        EventType::Cremation,
        EventType::Residence,
        EventType::Occupation,
        EventType::Census,
        EventType::Other,
    ];

    /// Storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Birth => "birth",
            EventType::Death => "death",
            EventType::Marriage => "marriage",
            EventType::Divorce => "divorce",
            EventType::Baptism => "baptism",
            EventType::Christening => "christening",
            EventType::BarMitzvah => "bar_mitzvah",
            EventType::BatMitzvah => "bat_mitzvah",
            EventType::Confirmation => "confirmation",
            EventType::FirstCommunion => "first_communion",
            EventType::Graduation => "graduation",
            EventType::Immigration => "immigration",
            EventType::Emigration => "emigration",
            EventType::Naturalization => "naturalization",
            EventType::MilitaryService => "military_service",
            EventType::Retirement => "retirement",
            EventType::Burial => "burial",
            EventType::Cremation => "cremation",
            EventType::Residence => "residence",
            EventType::Occupation => "occupation",
            EventType::Census => "census",
            EventType::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Birth => "Birth",
            EventType::Death => "Death",
            EventType::Marriage => "Marriage",
            EventType::Divorce => "Divorce",
            EventType::Baptism => "Baptism",
            EventType::Christening => "Christening",
            EventType::BarMitzvah => "Bar Mitzvah",
            EventType::BatMitzvah => "Bat Mitzvah",
            EventType::Confirmation => "Confirmation",
            EventType::FirstCommunion => "First Communion",
            EventType::Graduation => "Graduation",
            EventType::Immigration => "Immigration",
            EventType::Emigration => "Emigration",
            EventType::Naturalization => "Naturalization",
            EventType::MilitaryService => "Military Service",
            EventType::Retirement => "Retirement",
            EventType::Burial => "Burial",
            EventType::Cremation => "Cremation",
            EventType::Residence => "Residence",
            EventType::Occupation => "Occupation",
            EventType::Census => "Census",
            EventType::Other => "Other Event",
        }
    }

    /// Category the type belongs to
    pub fn category(&self) -> EventCategory {
        match self {
            EventType::Birth | EventType::Death | EventType::Burial | EventType::Cremation => {
                EventCategory::Vital
            }
            EventType::Marriage | EventType::Divorce => EventCategory::Family,
            EventType::Baptism
            | EventType::Christening
            | EventType::BarMitzvah
            | EventType::BatMitzvah
            | EventType::Confirmation
            | EventType::FirstCommunion => EventCategory::Religious,
            EventType::Graduation => EventCategory::Education,
            EventType::Immigration | EventType::Emigration | EventType::Residence => {
                EventCategory::Residence
            }
            EventType::Naturalization => EventCategory::Legal,
            EventType::MilitaryService => EventCategory::Military,
            EventType::Retirement | EventType::Occupation => EventCategory::Occupation,
            EventType::Census => EventCategory::Record,
            EventType::Other => EventCategory::Other,
        }
    }

    /// Parse a storage tag; anything unrecognized becomes `Other`
    pub fn sanitize(s: &str) -> Self {
        let tag = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .unwrap_or_default()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded life event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Storage identifier
    pub id: EventId,

    /// Person the event belongs to
    pub person: PersonId,

    /// Kind of event
    #[serde(default)]
    pub event_type: EventType,

    /// When it happened
    #[serde(default)]
    pub date: Option<DateValue>,

    /// Where it happened
    #[serde(default)]
    pub place: Option<PlaceId>,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    /// Create an undated event
    pub fn new(id: EventId, person: PersonId, event_type: EventType) -> Self {
        Self {
            id,
            person,
            event_type,
            date: None,
            place: None,
            description: None,
        }
    }

    /// Builder-style helper setting the date
    pub fn on(mut self, date: DateValue) -> Self {
        self.date = Some(date);
        self
    }
}

/// One line of a person's timeline
///
/// Vital entries come from the person record and have no `event_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Kind of event
    pub event_type: EventType,

    /// Display label
    pub label: String,

    /// When it happened
    pub date: Option<DateValue>,

    /// Where it happened
    pub place: Option<PlaceId>,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source event record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,

    /// Whether the entry is a birth or death from the person record
    pub vital: bool,
}

impl TimelineEntry {
    /// Entry for a birth or death taken from the person record
    pub fn vital(event_type: EventType, date: DateValue, place: Option<PlaceId>) -> Self {
        Self {
            event_type,
            label: event_type.label().to_string(),
            date: Some(date),
            place,
            description: None,
            event_id: None,
            vital: true,
        }
    }
}

impl From<&Event> for TimelineEntry {
    fn from(event: &Event) -> Self {
        Self {
            event_type: event.event_type,
            label: event.event_type.label().to_string(),
            date: event.date.clone(),
            place: event.place,
            description: event.description.clone(),
            event_id: Some(event.id),
            vital: false,
        }
    }
}
