//! Calendar-neutral date triple and numeric date strings

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d{1,6})-(\d{1,2})-(\d{1,2})$").expect("numeric date pattern is valid")
});

/// A year/month/day triple in some calendar
///
/// The triple does not know its calendar; validation happens in the
/// converter that reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Year (astronomical numbering for Gregorian/Julian: 0 = 1 BCE)
    pub year: i64,
    /// Month number, 1-based
    pub month: u32,
    /// Day of month, 1-based
    pub day: u32,
}

impl CalendarDate {
    /// Create a date triple
    pub const fn new(year: i64, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Parse `YYYY-MM-DD` (single-digit month/day and a leading minus allowed)
    pub fn parse_numeric(s: &str) -> Option<Self> {
        let caps = NUMERIC_DATE.captures(s.trim())?;
        Some(Self {
            year: caps[1].parse().ok()?,
            month: caps[2].parse().ok()?,
            day: caps[3].parse().ok()?,
        })
    }

    /// Render as zero-padded `YYYY-MM-DD`
    pub fn to_numeric(&self) -> String {
        if self.year < 0 {
            format!("-{:04}-{:02}-{:02}", -self.year, self.month, self.day)
        } else {
            format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_numeric())
    }
}

/// Floor division for a positive divisor
pub(crate) fn floor_div(a: i64, b: i64) -> i64 {
    debug_assert!(b > 0);
    a.div_euclid(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(CalendarDate::parse_numeric("1990-1-5"), Some(CalendarDate::new(1990, 1, 5)));
        assert_eq!(CalendarDate::parse_numeric(" 0622-07-16 "), Some(CalendarDate::new(622, 7, 16)));
        assert_eq!(CalendarDate::parse_numeric("-0044-03-15"), Some(CalendarDate::new(-44, 3, 15)));
        assert_eq!(CalendarDate::parse_numeric("15 Nisan 5784"), None);
        assert_eq!(CalendarDate::parse_numeric("1990/01/05"), None);
    }

    #[test]
    fn test_to_numeric_padding() {
        assert_eq!(CalendarDate::new(622, 7, 6).to_numeric(), "0622-07-06");
        assert_eq!(CalendarDate::new(-44, 3, 15).to_numeric(), "-0044-03-15");
    }

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(-234, 19), -13);
        assert_eq!(floor_div(-6, 3), -2);
    }
}
