//! Union module - marital/parental pairings (families)

use crate::{DateValue, NameFormat, Person, PersonId, PlaceId, UnionId};
use serde::{Deserialize, Serialize};

/// Status of a union
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnionStatus {
    /// Married
    Married,
    /// Divorced
    Divorced,
    /// Separated
    Separated,
    /// Widowed
    Widowed,
    /// Unmarried partnership
    Partnership,
    /// Not recorded
    #[default]
    Unknown,
}

impl UnionStatus {
    /// Parse a status tag; anything unrecognized becomes `Unknown`
    pub fn sanitize(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "married" => UnionStatus::Married,
            "divorced" => UnionStatus::Divorced,
            "separated" => UnionStatus::Separated,
            "widowed" => UnionStatus::Widowed,
            "partnership" => UnionStatus::Partnership,
            _ => UnionStatus::Unknown,
        }
    }
}

/// How a child relates to the union's spouses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildRelation {
    /// Biological child
    #[default]
    Biological,
    /// Adopted child
    Adopted,
    /// Foster child
    Foster,
    /// Stepchild
    Step,
    /// Not recorded
    Unknown,
}

impl ChildRelation {
    /// Parse a relation tag; anything unrecognized becomes `Unknown`
    pub fn sanitize(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "biological" => ChildRelation::Biological,
            "adopted" => ChildRelation::Adopted,
            "foster" => ChildRelation::Foster,
            "step" => ChildRelation::Step,
            _ => ChildRelation::Unknown,
        }
    }
}

/// A child's membership in a union
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildLink {
    /// The child
    pub person: PersonId,

    /// Position among siblings (lower first)
    #[serde(default)]
    pub birth_order: u32,

    /// Kind of parent-child relation
    #[serde(default)]
    pub relation: ChildRelation,
}

impl ChildLink {
    /// Biological child at the given birth order
    pub fn new(person: PersonId, birth_order: u32) -> Self {
        Self {
            person,
            birth_order,
            relation: ChildRelation::Biological,
        }
    }
}

/// A union (family) record
///
/// Spouse order carries no meaning; parent gender is resolved from the spouse
/// records themselves. A union with neither spouses nor children is allowed
/// by the model but callers should not create one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    /// Storage identifier
    pub id: UnionId,

    /// Public identifier (UUIDv7)
    #[serde(default = "uuid::Uuid::now_v7")]
    pub uuid: uuid::Uuid,

    /// First spouse/partner
    #[serde(default)]
    pub spouse1: Option<PersonId>,

    /// Second spouse/partner
    #[serde(default)]
    pub spouse2: Option<PersonId>,

    /// Marriage date
    #[serde(default)]
    pub marriage_date: Option<DateValue>,

    /// Marriage place
    #[serde(default)]
    pub marriage_place: Option<PlaceId>,

    /// Divorce date
    #[serde(default)]
    pub divorce_date: Option<DateValue>,

    /// Union status
    #[serde(default)]
    pub status: UnionStatus,

    /// Children, kept sorted by birth order
    #[serde(default)]
    pub children: Vec<ChildLink>,
}

impl Union {
    /// Create a union between up to two spouses
    pub fn new(id: UnionId, spouse1: Option<PersonId>, spouse2: Option<PersonId>) -> Self {
        Self {
            id,
            uuid: uuid::Uuid::now_v7(),
            spouse1,
            spouse2,
            marriage_date: None,
            marriage_place: None,
            divorce_date: None,
            status: UnionStatus::Unknown,
            children: Vec::new(),
        }
    }

    /// Spouses that are present, spouse1 first
    pub fn spouses(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.spouse1.into_iter().chain(self.spouse2)
    }

    /// Whether the person is one of the spouses
    pub fn has_spouse(&self, person: PersonId) -> bool {
        self.spouse1 == Some(person) || self.spouse2 == Some(person)
    }

    /// The spouse opposite `person`, if the person is a spouse and a partner exists
    pub fn partner_of(&self, person: PersonId) -> Option<PersonId> {
        if self.spouse1 == Some(person) {
            self.spouse2
        } else if self.spouse2 == Some(person) {
            self.spouse1
        } else {
            None
        }
    }

    /// Whether this union joins exactly the given unordered pair
    pub fn joins(&self, a: Option<PersonId>, b: Option<PersonId>) -> bool {
        (self.spouse1 == a && self.spouse2 == b) || (self.spouse1 == b && self.spouse2 == a)
    }

    /// Whether the person is listed as a child
    pub fn has_child(&self, person: PersonId) -> bool {
        self.children.iter().any(|c| c.person == person)
    }

    /// Child ids in birth order
    pub fn child_ids(&self) -> Vec<PersonId> {
        self.children.iter().map(|c| c.person).collect()
    }

    /// Title such as "John Smith & Jane Doe Family"
    pub fn display_title(spouse1: Option<&Person>, spouse2: Option<&Person>) -> String {
        let parts: Vec<String> = [spouse1, spouse2]
            .into_iter()
            .flatten()
            .map(|p| p.display_name(NameFormat::Short))
            .collect();

        if parts.is_empty() {
            "Unknown Family".to_string()
        } else {
            format!("{} Family", parts.join(" & "))
        }
    }
}
