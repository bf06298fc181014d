//! Place module - deduplicated locations
//!
//! Places are deduplicated by a normalized key, so "New York, NY, USA" and
//! "new york,ny,usa" resolve to the same record.

use crate::PlaceId;
use serde::{Deserialize, Serialize};

/// Names that, on their own, are taken to be a country rather than a city
const COMMON_COUNTRIES: &[&str] = &[
    "usa",
    "united states",
    "canada",
    "uk",
    "united kingdom",
    "germany",
    "france",
    "israel",
    "australia",
    "poland",
];

/// Context in which a person is linked to a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceContext {
    /// Birth place
    Birth,
    /// Death place
    Death,
    /// Marriage place
    Marriage,
}

/// Structured components parsed from a free-text place name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceComponents {
    /// City or town
    pub city: Option<String>,
    /// State, province or region
    pub state_province: Option<String>,
    /// Country
    pub country: Option<String>,
}

impl PlaceComponents {
    /// Split a comma-separated place name into components
    ///
    /// Three or more parts are read as city, state/province, country (the
    /// last part). Two parts are city and country. A single part is a country
    /// when it is a well-known country name, otherwise a city.
    pub fn parse(name: &str) -> Self {
        let parts: Vec<&str> = name
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [] => Self::default(),
            [only] => {
                if COMMON_COUNTRIES.contains(&only.to_lowercase().as_str()) {
                    Self {
                        country: Some(only.to_string()),
                        ..Self::default()
                    }
                } else {
                    Self {
                        city: Some(only.to_string()),
                        ..Self::default()
                    }
                }
            }
            [city, country] => Self {
                city: Some(city.to_string()),
                state_province: None,
                country: Some(country.to_string()),
            },
            [city, state, .., country] => Self {
                city: Some(city.to_string()),
                state_province: Some(state.to_string()),
                country: Some(country.to_string()),
            },
        }
    }
}

/// A place record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Storage identifier
    pub id: PlaceId,

    /// Name as first entered
    pub name: String,

    /// Deduplication key, see [`normalize_place_name`]
    #[serde(default)]
    pub normalized_name: String,

    /// Parsed components
    #[serde(default, flatten)]
    pub components: PlaceComponents,

    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Place {
    /// Create a place from free text, deriving its key and components
    pub fn from_name(id: PlaceId, name: &str) -> Self {
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            id,
            normalized_name: normalize_place_name(&name),
            components: PlaceComponents::parse(&name),
            name,
            latitude: None,
            longitude: None,
        }
    }

    /// Coordinates, when both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Compute the deduplication key for a place name
///
/// Lowercases, keeps only letters, digits, whitespace and commas, collapses
/// runs of whitespace, and removes whitespace around commas.
pub fn normalize_place_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == ',')
        .collect();

    kept.split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_equivalent_spellings() {
        assert_eq!(
            normalize_place_name("New York, NY, USA"),
            normalize_place_name("new york,ny,usa")
        );
        assert_eq!(normalize_place_name("New York, NY, USA"), "new york,ny,usa");
    }

    #[test]
    fn test_normalize_strips_punctuation_and_whitespace() {
        assert_eq!(normalize_place_name("  St. Louis,   Mo.  "), "st louis,mo");
        assert_eq!(normalize_place_name("Kraków,\tPoland"), "kraków,poland");
    }

    #[test]
    fn test_parse_components() {
        let three = PlaceComponents::parse("Springfield, Illinois, USA");
        assert_eq!(three.city.as_deref(), Some("Springfield"));
        assert_eq!(three.state_province.as_deref(), Some("Illinois"));
        assert_eq!(three.country.as_deref(), Some("USA"));

        let four = PlaceComponents::parse("Brooklyn, Kings, New York, USA");
        assert_eq!(four.state_province.as_deref(), Some("Kings"));
        assert_eq!(four.country.as_deref(), Some("USA"));

        let two = PlaceComponents::parse("Paris, France");
        assert_eq!(two.city.as_deref(), Some("Paris"));
        assert_eq!(two.country.as_deref(), Some("France"));
    }

    #[test]
    fn test_single_part_country_detection() {
        assert_eq!(PlaceComponents::parse("Israel").country.as_deref(), Some("Israel"));
        assert_eq!(PlaceComponents::parse("Vilnius").city.as_deref(), Some("Vilnius"));
        assert_eq!(PlaceComponents::parse(""), PlaceComponents::default());
    }

    #[test]
    fn test_place_from_name() {
        let place = Place::from_name(PlaceId::new(1), "  Haifa,  Israel ");
        assert_eq!(place.name, "Haifa, Israel");
        assert_eq!(place.normalized_name, "haifa,israel");
        assert_eq!(place.components.country.as_deref(), Some("Israel"));
        assert_eq!(place.coordinates(), None);
    }
}
