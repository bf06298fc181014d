//! Identifier newtypes
//!
//! Storage assigns numeric ids; they are stable for the lifetime of an entity
//! and never reused. Ordering on ids is what makes chart and traversal output
//! deterministic, so every id type is `Ord`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw storage value
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw value
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }
    };
}

numeric_id!(
    /// Identifier of a person record
    PersonId,
    "person id"
);

numeric_id!(
    /// Identifier of a union (family) record
    UnionId,
    "union id"
);

numeric_id!(
    /// Identifier of a place record
    PlaceId,
    "place id"
);

numeric_id!(
    /// Identifier of a life event record
    EventId,
    "event id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_and_display() {
        let id: PersonId = "42".parse().unwrap();
        assert_eq!(id, PersonId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 7 ".parse::<UnionId>().unwrap().value(), 7);
    }

    #[test]
    fn test_id_invalid_string() {
        assert!("abc".parse::<PersonId>().is_err());
        assert!("".parse::<PlaceId>().is_err());
        assert!("-1".parse::<PersonId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&PersonId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: PersonId = serde_json::from_str("9").unwrap();
        assert_eq!(back, PersonId::new(9));
    }
}
