//! Person module - the individuals in a family graph

use crate::{DateValue, PersonId, PlaceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recorded gender of a person
///
/// Only used to pick gendered kinship nouns and parent slots; it carries no
/// other semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,

    /// Female
    Female,

    /// Other
    Other,

    /// Not recorded
    #[default]
    Unknown,
}

impl Gender {
    /// Storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unknown => "unknown",
        }
    }

    /// Parse a gender tag; anything unrecognized becomes `Unknown`
    pub fn sanitize(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            "other" => Gender::Other,
            _ => Gender::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to render a person's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameFormat {
    /// First, middle and surname, with the maiden name when it differs
    #[default]
    Full,

    /// First name and surname
    Short,

    /// "Surname, First"
    SurnameFirst,
}

/// A person record
///
/// The id is immutable once assigned by storage; every other attribute is
/// changed only through the repository's update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Storage identifier
    pub id: PersonId,

    /// Public identifier (UUIDv7)
    #[serde(default = "uuid::Uuid::now_v7")]
    pub uuid: uuid::Uuid,

    /// Given name
    #[serde(default)]
    pub first_name: Option<String>,

    /// Middle name(s)
    #[serde(default)]
    pub middle_name: Option<String>,

    /// Family name
    #[serde(default)]
    pub surname: Option<String>,

    /// Birth family name
    #[serde(default)]
    pub maiden_name: Option<String>,

    /// Informal name
    #[serde(default)]
    pub nickname: Option<String>,

    /// Recorded gender
    #[serde(default)]
    pub gender: Gender,

    /// Birth date
    #[serde(default)]
    pub birth_date: Option<DateValue>,

    /// Death date
    #[serde(default)]
    pub death_date: Option<DateValue>,

    /// Birth place reference
    #[serde(default)]
    pub birth_place: Option<PlaceId>,

    /// Death place reference
    #[serde(default)]
    pub death_place: Option<PlaceId>,

    /// Whether the person is believed to be alive
    #[serde(default)]
    pub living: bool,

    /// Default photo, as resolved by the media collaborator
    #[serde(default)]
    pub photo_url: Option<String>,

    /// Occupation
    #[serde(default)]
    pub occupation: Option<String>,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Person {
    /// Create a person with only an id and a gender
    pub fn new(id: PersonId, gender: Gender) -> Self {
        Self {
            id,
            uuid: uuid::Uuid::now_v7(),
            first_name: None,
            middle_name: None,
            surname: None,
            maiden_name: None,
            nickname: None,
            gender,
            birth_date: None,
            death_date: None,
            birth_place: None,
            death_place: None,
            living: false,
            photo_url: None,
            occupation: None,
            notes: None,
        }
    }

    /// Builder-style helper setting first name and surname
    pub fn named(mut self, first_name: &str, surname: &str) -> Self {
        self.first_name = non_blank(first_name);
        self.surname = non_blank(surname);
        self
    }

    /// Render the person's name
    ///
    /// Falls back to the nickname when no name parts are present, then to
    /// "Unknown".
    pub fn display_name(&self, format: NameFormat) -> String {
        let mut parts: Vec<String> = Vec::new();

        match format {
            NameFormat::Short => {
                parts.extend(self.first_name.iter().cloned());
                parts.extend(self.surname.iter().cloned());
            }
            NameFormat::Full => {
                parts.extend(self.first_name.iter().cloned());
                parts.extend(self.middle_name.iter().cloned());
                parts.extend(self.surname.iter().cloned());
                if let Some(maiden) = &self.maiden_name {
                    if self.surname.as_ref() != Some(maiden) {
                        parts.push(format!("(née {})", maiden));
                    }
                }
            }
            NameFormat::SurnameFirst => {
                if let Some(surname) = &self.surname {
                    parts.push(format!("{},", surname));
                }
                parts.extend(self.first_name.iter().cloned());
            }
        }

        let name = parts.join(" ");
        let name = name.trim_end_matches(',').to_string();
        if !name.is_empty() {
            return name;
        }

        match &self.nickname {
            Some(nickname) => nickname.clone(),
            None => "Unknown".to_string(),
        }
    }

    /// Places referenced by this person, tagged with their context
    pub fn place_refs(&self) -> Vec<(PlaceId, crate::PlaceContext)> {
        let mut refs = Vec::new();
        if let Some(place) = self.birth_place {
            refs.push((place, crate::PlaceContext::Birth));
        }
        if let Some(place) = self.death_place {
            refs.push((place, crate::PlaceContext::Death));
        }
        refs
    }

    /// Trim name fields and drop the ones left empty
    pub fn normalize_names(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.middle_name,
            &mut self.surname,
            &mut self.maiden_name,
            &mut self.nickname,
            &mut self.occupation,
        ] {
            *field = field.as_deref().and_then(non_blank);
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Person {
        let mut p = Person::new(PersonId::new(1), Gender::Female).named("Jane", "Smith");
        p.middle_name = Some("Ann".to_string());
        p.maiden_name = Some("Doe".to_string());
        p
    }

    #[test]
    fn test_display_name_formats() {
        let p = jane();
        assert_eq!(p.display_name(NameFormat::Full), "Jane Ann Smith (née Doe)");
        assert_eq!(p.display_name(NameFormat::Short), "Jane Smith");
        assert_eq!(p.display_name(NameFormat::SurnameFirst), "Smith, Jane");
    }

    #[test]
    fn test_maiden_name_hidden_when_same_as_surname() {
        let mut p = jane();
        p.maiden_name = Some("Smith".to_string());
        assert_eq!(p.display_name(NameFormat::Full), "Jane Ann Smith");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut p = Person::new(PersonId::new(2), Gender::Unknown);
        assert_eq!(p.display_name(NameFormat::Full), "Unknown");
        p.nickname = Some("Bubbe".to_string());
        assert_eq!(p.display_name(NameFormat::Short), "Bubbe");
    }

    #[test]
    fn test_surname_first_without_first_name() {
        let mut p = Person::new(PersonId::new(3), Gender::Male);
        p.surname = Some("Cohen".to_string());
        assert_eq!(p.display_name(NameFormat::SurnameFirst), "Cohen");
    }

    #[test]
    fn test_gender_sanitize() {
        assert_eq!(Gender::sanitize("Female"), Gender::Female);
        assert_eq!(Gender::sanitize("m"), Gender::Male);
        assert_eq!(Gender::sanitize("robot"), Gender::Unknown);
    }

    #[test]
    fn test_normalize_names() {
        let mut p = Person::new(PersonId::new(4), Gender::Male);
        p.first_name = Some("  John   Paul ".to_string());
        p.nickname = Some("   ".to_string());
        p.normalize_names();
        assert_eq!(p.first_name.as_deref(), Some("John Paul"));
        assert_eq!(p.nickname, None);
    }
}
