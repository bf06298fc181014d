//! Tabular Islamic (Hijri) calendar
//!
//! Arithmetic 30-year cycle with 11 leap years and the civil epoch
//! (1 Muharram 1 AH = JDN 1948440). Dates can differ by a day or two from
//! observation-based calendars.

use crate::converter::CalendarConverter;
use crate::date::floor_div;
use crate::error::{CalendarError, Result};
use crate::CalendarDate;
use lineage_domain::CalendarSystem;

/// JDN of 1 Muharram 1 AH
pub const EPOCH_JDN: i64 = 1948440;

/// Islamic converter
#[derive(Debug, Clone, Copy, Default)]
pub struct Islamic;

impl Islamic {
    /// Leap years add a day to Dhu al-Hijjah
    pub fn is_leap_year(year: i64) -> bool {
        (14 + 11 * year).rem_euclid(30) < 11
    }
}

impl CalendarConverter for Islamic {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Islamic
    }

    fn months_in_year(&self, _year: i64) -> u32 {
        12
    }

    fn days_in_month(&self, year: i64, month: u32) -> u32 {
        match month {
            12 if Self::is_leap_year(year) => 30,
            1..=12 if month % 2 == 1 => 30,
            1..=12 => 29,
            _ => 0,
        }
    }

    fn min_year(&self) -> Option<i64> {
        Some(1)
    }

    fn jdn_of(&self, date: CalendarDate) -> i64 {
        let month = i64::from(date.month);
        // ceil(29.5 * (month - 1))
        let month_offset = floor_div(59 * (month - 1) + 1, 2);

        i64::from(date.day)
            + month_offset
            + 354 * (date.year - 1)
            + floor_div(3 + 11 * date.year, 30)
            + EPOCH_JDN
            - 1
    }

    fn from_jdn(&self, jdn: i64) -> Result<CalendarDate> {
        if jdn < EPOCH_JDN {
            return Err(CalendarError::BeforeEpoch {
                calendar: CalendarSystem::Islamic,
                jdn,
            });
        }

        let year = floor_div(30 * (jdn - EPOCH_JDN) + 10646, 10631);
        let into_year = jdn - (29 + self.jdn_of(CalendarDate::new(year, 1, 1)));
        // ceil(into_year / 29.5) + 1, capped at Dhu al-Hijjah
        let month = (floor_div(2 * into_year + 58, 59) + 1).min(12);
        let day = jdn - self.jdn_of(CalendarDate::new(year, month as u32, 1)) + 1;

        Ok(CalendarDate::new(year, month as u32, day as u32))
    }
}
