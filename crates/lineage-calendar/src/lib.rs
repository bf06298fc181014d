//! Lineage Calendar Engine
//!
//! Date conversion between the Gregorian, Hebrew (Jewish), Julian and
//! Islamic (Hijri) calendars, plus display formatting and lenient parsing of
//! user-typed dates.
//!
//! ## Key Concepts
//!
//! - **Julian Day Number (JDN)**: a continuous day count used as the neutral
//!   interchange value. Each calendar implements one `to_jdn`/`from_jdn` pair
//!   through [`CalendarConverter`]; any-to-any conversion goes through it.
//! - **Storage format**: `YYYY-MM-DD` for Gregorian, Julian and Islamic dates;
//!   `"<day> <Month> <year>"` for Hebrew dates.
//! - **Best effort**: the string functions in [`engine`] return their input
//!   unchanged when it cannot be read. Recorded dates are often partial.
//!
//! ## Example
//!
//! ```
//! use lineage_calendar::{from_gregorian, format_for_display, parse_user_input};
//! use lineage_domain::CalendarSystem;
//!
//! assert_eq!(from_gregorian("2024-04-23", CalendarSystem::Hebrew), "15 Nisan 5784");
//!
//! let parsed = parse_user_input("circa 1850");
//! assert_eq!(parsed.date, "1850-01-01");
//! assert!(parsed.approximate);
//!
//! assert_eq!(
//!     format_for_display(&parsed.date, CalendarSystem::Gregorian, parsed.approximate),
//!     "about January 1, 1850"
//! );
//! ```

#![warn(missing_docs)]

pub mod converter;
pub mod date;
pub mod engine;
pub mod error;
pub mod gregorian;
pub mod hebrew;
pub mod islamic;
pub mod julian;

pub use converter::{convert_date, converter_for, CalendarConverter};
pub use date::CalendarDate;
pub use engine::{
    convert, day_number, format_for_display, from_gregorian, from_jdn, parse_user_input,
    to_gregorian, to_jdn, try_convert, try_from_gregorian, try_to_gregorian, ParsedDate,
};
pub use error::{CalendarError, Result};
pub use gregorian::Gregorian;
pub use hebrew::{Hebrew, YearKind};
pub use islamic::Islamic;
pub use julian::Julian;
