//! Hebrew (Jewish) lunisolar calendar
//!
//! Month numbering starts at Nisan (1) but the year starts at Tishrei (7):
//! a year runs 7, 8, ..., 12, [13,] 1, ..., 6. The first day of each year is
//! found from the molad of Tishrei with the postponement rules, so every year
//! length is the real distance between consecutive Tishrei-1 dates.

use crate::converter::CalendarConverter;
use crate::date::floor_div;
use crate::error::{CalendarError, Result};
use crate::CalendarDate;
use lineage_domain::CalendarSystem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// JDN of 1 Tishrei, year 1 (the epoch 347995.5 taken at noon)
pub const EPOCH_JDN: i64 = 347998;

/// Parts in an hour (1080) times 24
const PARTS_PER_DAY: i64 = 25920;

static NAMED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s+([A-Za-z']+(?:\s+(?:II|I|2|1))?)\s+(\d{1,5})$")
        .expect("hebrew date pattern is valid")
});

const MONTH_NAMES: [&str; 13] = [
    "Nisan", "Iyar", "Sivan", "Tammuz", "Av", "Elul", "Tishrei", "Cheshvan", "Kislev", "Tevet",
    "Shevat", "Adar", "Adar II",
];

/// Classification of a year by its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearKind {
    /// 353 or 383 days: Cheshvan and Kislev both 29
    Deficient,
    /// 354 or 384 days: Cheshvan 29, Kislev 30
    Regular,
    /// 355 or 385 days: Cheshvan and Kislev both 30
    Complete,
}

/// Hebrew converter
#[derive(Debug, Clone, Copy, Default)]
pub struct Hebrew;

impl Hebrew {
    /// Leap years hold a thirteenth month (7 per 19-year cycle)
    pub fn is_leap_year(year: i64) -> bool {
        (7 * year + 1).rem_euclid(19) < 7
    }

    /// Days from the epoch's molad reckoning to Tishrei 1, before the
    /// year-length postponements
    fn elapsed_days(year: i64) -> i64 {
        let months = floor_div(235 * year - 234, 19);
        let parts = 12084 + 13753 * months;
        let mut day = months * 29 + floor_div(parts, PARTS_PER_DAY);
        // Tishrei 1 may not fall on Sunday, Wednesday or Friday
        if (3 * (day + 1)).rem_euclid(7) < 3 {
            day += 1;
        }
        day
    }

    /// Postponement that keeps year lengths within 353..=355 / 383..=385
    fn length_delay(year: i64) -> i64 {
        let last = Self::elapsed_days(year - 1);
        let present = Self::elapsed_days(year);
        let next = Self::elapsed_days(year + 1);

        if next - present == 356 {
            2
        } else if present - last == 382 {
            1
        } else {
            0
        }
    }

    /// JDN of 1 Tishrei of the year
    pub fn new_year_jdn(year: i64) -> i64 {
        EPOCH_JDN + Self::elapsed_days(year) + Self::length_delay(year)
    }

    /// Number of days in the year
    pub fn year_length(year: i64) -> i64 {
        Self::new_year_jdn(year + 1) - Self::new_year_jdn(year)
    }

    /// Deficient / regular / complete classification
    pub fn year_kind(year: i64) -> YearKind {
        match Self::year_length(year) % 10 {
            3 => YearKind::Deficient,
            5 => YearKind::Complete,
            _ => YearKind::Regular,
        }
    }

    /// Months of the year in civil order, starting at Tishrei
    pub fn month_order(year: i64) -> Vec<u32> {
        let last = if Self::is_leap_year(year) { 13 } else { 12 };
        (7..=last).chain(1..=6).collect()
    }

    /// English name of a month; month 12 is "Adar I" in leap years
    pub fn month_name(year: i64, month: u32) -> Option<&'static str> {
        match month {
            12 if Self::is_leap_year(year) => Some("Adar I"),
            1..=13 => Some(MONTH_NAMES[month as usize - 1]),
            _ => None,
        }
    }

    /// Look up a month number by name, accepting historical spellings
    pub fn month_from_name(name: &str) -> Option<u32> {
        let key = name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let month = match key.as_str() {
            "nisan" | "nissan" => 1,
            "iyar" | "iyyar" => 2,
            "sivan" => 3,
            "tammuz" | "tamuz" => 4,
            "av" => 5,
            "elul" => 6,
            "tishrei" | "tishri" => 7,
            "cheshvan" | "heshvan" | "marcheshvan" => 8,
            "kislev" => 9,
            "tevet" | "teves" => 10,
            "shevat" | "shvat" => 11,
            "adar" | "adar i" | "adar 1" => 12,
            "adar ii" | "adar 2" => 13,
            _ => return None,
        };
        Some(month)
    }
}

impl CalendarConverter for Hebrew {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Hebrew
    }

    fn months_in_year(&self, year: i64) -> u32 {
        if Self::is_leap_year(year) {
            13
        } else {
            12
        }
    }

    fn days_in_month(&self, year: i64, month: u32) -> u32 {
        match month {
            2 | 4 | 6 | 10 | 13 => 29,
            12 if !Self::is_leap_year(year) => 29,
            8 if Self::year_kind(year) != YearKind::Complete => 29,
            9 if Self::year_kind(year) == YearKind::Deficient => 29,
            1..=12 => 30,
            _ => 0,
        }
    }

    fn min_year(&self) -> Option<i64> {
        Some(1)
    }

    fn jdn_of(&self, date: CalendarDate) -> i64 {
        let mut jdn = Self::new_year_jdn(date.year);
        for month in Self::month_order(date.year) {
            if month == date.month {
                break;
            }
            jdn += i64::from(self.days_in_month(date.year, month));
        }
        jdn + i64::from(date.day) - 1
    }

    fn from_jdn(&self, jdn: i64) -> Result<CalendarDate> {
        if jdn < EPOCH_JDN {
            return Err(CalendarError::BeforeEpoch {
                calendar: CalendarSystem::Hebrew,
                jdn,
            });
        }

        // Mean year of 365.2468 days, then correct across year boundaries
        let mut year = floor_div((jdn - EPOCH_JDN) * 190, 69396) + 1;
        while year > 1 && Self::new_year_jdn(year) > jdn {
            year -= 1;
        }
        while Self::new_year_jdn(year + 1) <= jdn {
            year += 1;
        }

        let mut start = Self::new_year_jdn(year);
        for month in Self::month_order(year) {
            let length = i64::from(self.days_in_month(year, month));
            if jdn < start + length {
                return Ok(CalendarDate::new(year, month, (jdn - start + 1) as u32));
            }
            start += length;
        }

        // Unreachable while year lengths agree with the month table
        Err(CalendarError::BeforeEpoch {
            calendar: CalendarSystem::Hebrew,
            jdn,
        })
    }

    /// Accepts "15 Nisan 5784" or numeric "5784-01-15"
    fn parse(&self, input: &str) -> Result<CalendarDate> {
        let trimmed = input.trim();
        let date = if let Some(caps) = NAMED_DATE.captures(trimmed) {
            let month = Self::month_from_name(&caps[2])
                .ok_or_else(|| CalendarError::UnknownMonth(caps[2].to_string()))?;
            let invalid = || CalendarError::InvalidFormat {
                calendar: CalendarSystem::Hebrew,
                input: input.to_string(),
            };
            CalendarDate::new(
                caps[3].parse().map_err(|_| invalid())?,
                month,
                caps[1].parse().map_err(|_| invalid())?,
            )
        } else {
            CalendarDate::parse_numeric(trimmed).ok_or_else(|| CalendarError::InvalidFormat {
                calendar: CalendarSystem::Hebrew,
                input: input.to_string(),
            })?
        };

        self.validate(date)?;
        Ok(date)
    }

    fn format(&self, date: CalendarDate) -> String {
        match Self::month_name(date.year, date.month) {
            Some(name) => format!("{} {} {}", date.day, name, date.year),
            None => date.to_numeric(),
        }
    }
}
