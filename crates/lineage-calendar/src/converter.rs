//! The per-calendar conversion seam
//!
//! Every calendar converts to and from a Julian Day Number, so converting
//! between any two calendars is `from_jdn(to_jdn(date))` and each calendar
//! only implements its own pair.

use crate::error::{CalendarError, Result};
use crate::{CalendarDate, Gregorian, Hebrew, Islamic, Julian};
use lineage_domain::CalendarSystem;

/// Conversion between one calendar and Julian Day Numbers
pub trait CalendarConverter: Send + Sync {
    /// Calendar this converter handles
    fn system(&self) -> CalendarSystem;

    /// Number of months in the year
    fn months_in_year(&self, year: i64) -> u32;

    /// Number of days in the month
    fn days_in_month(&self, year: i64, month: u32) -> u32;

    /// Earliest year the calendar counts, if bounded
    fn min_year(&self) -> Option<i64> {
        None
    }

    /// JDN of an already-validated date
    fn jdn_of(&self, date: CalendarDate) -> i64;

    /// Date containing the given JDN
    fn from_jdn(&self, jdn: i64) -> Result<CalendarDate>;

    /// Parse the calendar's storage format
    fn parse(&self, input: &str) -> Result<CalendarDate> {
        let date = CalendarDate::parse_numeric(input).ok_or_else(|| CalendarError::InvalidFormat {
            calendar: self.system(),
            input: input.to_string(),
        })?;
        self.validate(date)?;
        Ok(date)
    }

    /// Render in the calendar's storage format
    fn format(&self, date: CalendarDate) -> String {
        date.to_numeric()
    }

    /// Check month and day bounds
    fn validate(&self, date: CalendarDate) -> Result<()> {
        let out_of_range = || CalendarError::OutOfRange {
            calendar: self.system(),
            year: date.year,
            month: date.month,
            day: date.day,
        };

        if self.min_year().is_some_and(|min| date.year < min) {
            return Err(out_of_range());
        }
        if date.month < 1 || date.month > self.months_in_year(date.year) {
            return Err(out_of_range());
        }
        if date.day < 1 || date.day > self.days_in_month(date.year, date.month) {
            return Err(out_of_range());
        }
        Ok(())
    }

    /// Validate then convert to a JDN
    fn to_jdn(&self, date: CalendarDate) -> Result<i64> {
        self.validate(date)?;
        Ok(self.jdn_of(date))
    }
}

/// Converter for a calendar system
pub fn converter_for(system: CalendarSystem) -> &'static dyn CalendarConverter {
    match system {
        CalendarSystem::Gregorian => &Gregorian,
        CalendarSystem::Hebrew => &Hebrew,
        CalendarSystem::Julian => &Julian,
        CalendarSystem::Islamic => &Islamic,
    }
}

/// Convert a date between two calendars through its JDN
pub fn convert_date(date: CalendarDate, from: CalendarSystem, to: CalendarSystem) -> Result<CalendarDate> {
    let jdn = converter_for(from).to_jdn(date)?;
    converter_for(to).from_jdn(jdn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_for_matches_system() {
        for system in CalendarSystem::ALL {
            assert_eq!(converter_for(system).system(), system);
        }
    }

    #[test]
    fn test_convert_date_gregorian_to_julian() {
        let julian = convert_date(
            CalendarDate::new(1582, 10, 15),
            CalendarSystem::Gregorian,
            CalendarSystem::Julian,
        )
        .unwrap();
        assert_eq!(julian, CalendarDate::new(1582, 10, 5));
    }

    #[test]
    fn test_validate_rejects_bad_days() {
        let greg = converter_for(CalendarSystem::Gregorian);
        assert!(greg.validate(CalendarDate::new(2023, 2, 29)).is_err());
        assert!(greg.validate(CalendarDate::new(2024, 2, 29)).is_ok());
        assert!(greg.validate(CalendarDate::new(2024, 13, 1)).is_err());
        assert!(greg.validate(CalendarDate::new(2024, 4, 0)).is_err());
    }
}
