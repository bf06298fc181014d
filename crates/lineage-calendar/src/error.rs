//! Error types for calendar conversions

use lineage_domain::CalendarSystem;
use thiserror::Error;

/// Errors raised by the typed conversion API
///
/// The string-level functions in [`crate::engine`] never surface these; they
/// fall back to returning their input unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Input did not match the calendar's storage format
    #[error("Invalid {calendar} date format: '{input}'")]
    InvalidFormat {
        /// Calendar the input was read as
        calendar: CalendarSystem,
        /// Offending input
        input: String,
    },

    /// Hebrew month name not in the lookup table
    #[error("Unknown month name: '{0}'")]
    UnknownMonth(String),

    /// Month or day outside the calendar's bounds
    #[error("Date out of range in {calendar}: {year}-{month}-{day}")]
    OutOfRange {
        /// Calendar the date belongs to
        calendar: CalendarSystem,
        /// Year
        year: i64,
        /// Month
        month: u32,
        /// Day
        day: u32,
    },

    /// Day number falls before the calendar's epoch
    #[error("Day number {jdn} precedes the {calendar} epoch")]
    BeforeEpoch {
        /// Calendar asked for
        calendar: CalendarSystem,
        /// Julian Day Number
        jdn: i64,
    },
}

/// Result alias for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;
