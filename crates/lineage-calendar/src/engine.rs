//! String-level calendar operations used by display and chart code
//!
//! These functions never fail: input that cannot be read is returned
//! unchanged, since recorded dates are often partial or free text. The
//! `try_*` variants expose the underlying error.

use crate::converter::{converter_for, CalendarConverter};
use crate::error::Result;
use crate::{CalendarDate, Gregorian};
use chrono::NaiveDate;
use lineage_domain::CalendarSystem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static APPROXIMATE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(about|circa|ca\.?|c\.?|~|≈)").expect("approximate marker pattern is valid")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("iso date pattern is valid"));

static YEAR_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year pattern is valid"));

/// Free-text layouts tried after the ISO and year-only shapes
const FREE_TEXT_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// Result of reading a user-typed date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDate {
    /// `YYYY-MM-DD` when recognized, otherwise the input without its marker
    pub date: String,
    /// Whether the input was marked or inferred as approximate
    pub approximate: bool,
}

/// Convert a stored date in `calendar` to a Gregorian `YYYY-MM-DD` string
///
/// Returns the input unchanged when it cannot be read.
pub fn to_gregorian(date: &str, calendar: CalendarSystem) -> String {
    best_effort(date, try_to_gregorian(date, calendar))
}

/// Convert a Gregorian `YYYY-MM-DD` string into `calendar`'s storage format
///
/// Returns the input unchanged when it cannot be read.
pub fn from_gregorian(date: &str, calendar: CalendarSystem) -> String {
    best_effort(date, try_from_gregorian(date, calendar))
}

/// Convert a stored date between any two calendars
pub fn convert(date: &str, from: CalendarSystem, to: CalendarSystem) -> String {
    best_effort(date, try_convert(date, from, to))
}

/// Fallible form of [`to_gregorian`]
pub fn try_to_gregorian(date: &str, calendar: CalendarSystem) -> Result<String> {
    try_convert(date, calendar, CalendarSystem::Gregorian)
}

/// Fallible form of [`from_gregorian`]
pub fn try_from_gregorian(date: &str, calendar: CalendarSystem) -> Result<String> {
    try_convert(date, CalendarSystem::Gregorian, calendar)
}

/// Fallible form of [`convert`]
pub fn try_convert(date: &str, from: CalendarSystem, to: CalendarSystem) -> Result<String> {
    let source = converter_for(from);
    let target = converter_for(to);

    let parsed = source.parse(date)?;
    if from == to {
        return Ok(target.format(parsed));
    }

    let jdn = source.to_jdn(parsed)?;
    Ok(target.format(target.from_jdn(jdn)?))
}

fn best_effort(input: &str, result: Result<String>) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match result {
        Ok(converted) => converted,
        Err(e) => {
            debug!(input, error = %e, "Date left unconverted");
            input.to_string()
        }
    }
}

/// Render a stored date for people to read
///
/// Gregorian dates read as "January 5, 1990"; other calendars keep their
/// stored text followed by the calendar name, e.g. "15 Nisan 5784 (Jewish
/// (Hebrew))". Approximate dates are prefixed with "about ".
pub fn format_for_display(date: &str, calendar: CalendarSystem, approximate: bool) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }

    let prefix = if approximate { "about " } else { "" };

    if calendar == CalendarSystem::Gregorian {
        return match gregorian_long_form(date) {
            Some(long) => format!("{}{}", prefix, long),
            None => format!("{}{}", prefix, date),
        };
    }

    format!("{}{} ({})", prefix, date, calendar.display_name())
}

fn gregorian_long_form(date: &str) -> Option<String> {
    let parsed = Gregorian.parse(date).ok()?;
    let year = i32::try_from(parsed.year).ok()?;
    let naive = NaiveDate::from_ymd_opt(year, parsed.month, parsed.day)?;
    Some(naive.format("%B %-d, %Y").to_string())
}

/// Read a date typed by a person
///
/// An approximate marker (about, circa, ca., c., ~, ≈) is stripped first.
/// Then the rest is tried as an ISO date (kept as typed), a bare year
/// (becomes January 1 and is forced approximate), and finally common
/// free-text layouts such as "March 3, 1901" or "March 1901". Anything else
/// comes back verbatim.
pub fn parse_user_input(input: &str) -> ParsedDate {
    let (rest, approximate) = strip_approximate_marker(input.trim());

    if rest.is_empty() {
        return ParsedDate {
            date: String::new(),
            approximate,
        };
    }

    if ISO_DATE.is_match(rest) {
        return ParsedDate {
            date: rest.to_string(),
            approximate,
        };
    }

    if YEAR_ONLY.is_match(rest) {
        return ParsedDate {
            date: format!("{}-01-01", rest),
            approximate: true,
        };
    }

    match parse_free_text(rest) {
        Some(date) => ParsedDate {
            date: date.format("%Y-%m-%d").to_string(),
            approximate,
        },
        None => {
            debug!(input = rest, "Unrecognized date input kept verbatim");
            ParsedDate {
                date: rest.to_string(),
                approximate,
            }
        }
    }
}

/// Split off a leading approximate marker
///
/// A marker made of letters only counts when it stands alone, so "Cairo"
/// keeps its "Ca".
fn strip_approximate_marker(input: &str) -> (&str, bool) {
    let Some(found) = APPROXIMATE_MARKER.find(input) else {
        return (input, false);
    };

    let rest = &input[found.end()..];
    let marker_ends_in_letter = found.as_str().chars().last().is_some_and(char::is_alphabetic);
    let stands_alone = rest
        .chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || c.is_ascii_digit());

    if marker_ends_in_letter && !stands_alone {
        return (input, false);
    }
    (rest.trim_start(), true)
}

fn parse_free_text(input: &str) -> Option<NaiveDate> {
    let input = input.split_whitespace().collect::<Vec<_>>().join(" ");

    FREE_TEXT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&input, fmt).ok())
        .or_else(|| {
            // Month and year only: "January 1990"
            let with_day = format!("1 {}", input);
            ["%d %B %Y", "%d %b %Y"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&with_day, fmt).ok())
        })
}

/// Typed conversion of a date triple to a JDN in any calendar
pub fn to_jdn(date: CalendarDate, calendar: CalendarSystem) -> Result<i64> {
    converter_for(calendar).to_jdn(date)
}

/// Day number of a stored date, for ordering dates kept in different calendars
///
/// Returns `None` for text the calendar cannot read.
pub fn day_number(date: &str, calendar: CalendarSystem) -> Option<i64> {
    let converter = converter_for(calendar);
    match converter.parse(date).and_then(|parsed| converter.to_jdn(parsed)) {
        Ok(jdn) => Some(jdn),
        Err(e) => {
            debug!(input = date, error = %e, "Date has no day number");
            None
        }
    }
}

/// Typed conversion of a JDN to a date triple in any calendar
pub fn from_jdn(jdn: i64, calendar: CalendarSystem) -> Result<CalendarDate> {
    converter_for(calendar).from_jdn(jdn)
}
