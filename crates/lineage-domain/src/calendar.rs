//! Calendar tags attached to stored dates
//!
//! The conversion math lives in `lineage-calendar`; this module only names the
//! supported systems and carries a date as it was entered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar system a date value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarSystem {
    /// Proleptic Gregorian calendar (canonical storage calendar)
    #[default]
    Gregorian,

    /// Jewish lunisolar calendar
    #[serde(alias = "jewish")]
    Hebrew,

    /// Julian calendar
    Julian,

    /// Tabular Islamic (Hijri) calendar
    #[serde(alias = "hijri")]
    Islamic,
}

impl CalendarSystem {
    /// Every supported calendar, in display order
    pub const ALL: [CalendarSystem; 4] = [
        CalendarSystem::Gregorian,
        CalendarSystem::Hebrew,
        CalendarSystem::Julian,
        CalendarSystem::Islamic,
    ];

    /// Storage tag for this calendar
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "gregorian",
            CalendarSystem::Hebrew => "hebrew",
            CalendarSystem::Julian => "julian",
            CalendarSystem::Islamic => "islamic",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "Gregorian",
            CalendarSystem::Hebrew => "Jewish (Hebrew)",
            CalendarSystem::Julian => "Julian",
            CalendarSystem::Islamic => "Islamic (Hijri)",
        }
    }

    /// Whether dates in this calendar are conventionally written right-to-left
    pub fn is_rtl(&self) -> bool {
        matches!(self, CalendarSystem::Hebrew | CalendarSystem::Islamic)
    }

    /// Parse a calendar tag, accepting common aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gregorian" => Some(CalendarSystem::Gregorian),
            "hebrew" | "jewish" => Some(CalendarSystem::Hebrew),
            "julian" => Some(CalendarSystem::Julian),
            "islamic" | "hijri" => Some(CalendarSystem::Islamic),
            _ => None,
        }
    }

    /// Parse a calendar tag, falling back to Gregorian for unknown input
    pub fn sanitize(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CalendarSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown calendar system: {}", s))
    }
}

/// A date as recorded on a person or union
///
/// `value` is kept exactly as stored: `YYYY-MM-DD` for Gregorian, Julian and
/// Islamic dates, `"<day> <Month> <year>"` for Hebrew dates, or free text when
/// the source was too vague to normalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    /// Stored date text
    pub value: String,

    /// Calendar the text is expressed in
    #[serde(default)]
    pub calendar: CalendarSystem,

    /// Whether the date is an estimate ("about 1850")
    #[serde(default)]
    pub approximate: bool,
}

impl DateValue {
    /// An exact Gregorian date
    pub fn gregorian(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            calendar: CalendarSystem::Gregorian,
            approximate: false,
        }
    }

    /// A date in an explicit calendar
    pub fn new(value: impl Into<String>, calendar: CalendarSystem, approximate: bool) -> Self {
        Self {
            value: value.into(),
            calendar,
            approximate,
        }
    }

    /// Whether the stored text is blank
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_aliases() {
        assert_eq!(CalendarSystem::parse("Jewish"), Some(CalendarSystem::Hebrew));
        assert_eq!(CalendarSystem::parse("HIJRI"), Some(CalendarSystem::Islamic));
        assert_eq!(CalendarSystem::parse("mayan"), None);
        assert_eq!(CalendarSystem::sanitize("mayan"), CalendarSystem::Gregorian);
    }

    #[test]
    fn test_calendar_direction() {
        assert!(CalendarSystem::Hebrew.is_rtl());
        assert!(CalendarSystem::Islamic.is_rtl());
        assert!(!CalendarSystem::Julian.is_rtl());
    }

    #[test]
    fn test_date_value_deserializes_legacy_tag() {
        let date: DateValue =
            serde_json::from_str(r#"{"value":"15 Nisan 5784","calendar":"jewish"}"#).unwrap();
        assert_eq!(date.calendar, CalendarSystem::Hebrew);
        assert!(!date.approximate);
    }
}
