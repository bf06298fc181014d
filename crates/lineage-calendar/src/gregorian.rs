//! Proleptic Gregorian calendar (Fliegel–Van Flandern)

use crate::converter::CalendarConverter;
use crate::date::floor_div;
use crate::error::Result;
use crate::CalendarDate;
use lineage_domain::CalendarSystem;

pub(crate) const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian converter
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl Gregorian {
    /// Gregorian leap-year rule
    pub fn is_leap_year(year: i64) -> bool {
        year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
    }
}

impl CalendarConverter for Gregorian {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Gregorian
    }

    fn months_in_year(&self, _year: i64) -> u32 {
        12
    }

    fn days_in_month(&self, year: i64, month: u32) -> u32 {
        match month {
            2 if Self::is_leap_year(year) => 29,
            1..=12 => MONTH_DAYS[month as usize - 1],
            _ => 0,
        }
    }

    fn jdn_of(&self, date: CalendarDate) -> i64 {
        let month = i64::from(date.month);
        let a = floor_div(14 - month, 12);
        let y = date.year + 4800 - a;
        let m = month + 12 * a - 3;

        i64::from(date.day) + floor_div(153 * m + 2, 5) + 365 * y + floor_div(y, 4)
            - floor_div(y, 100)
            + floor_div(y, 400)
            - 32045
    }

    fn from_jdn(&self, jdn: i64) -> Result<CalendarDate> {
        let a = jdn + 32044;
        let b = floor_div(4 * a + 3, 146097);
        let c = a - floor_div(146097 * b, 4);
        let d = floor_div(4 * c + 3, 1461);
        let e = c - floor_div(1461 * d, 4);
        let m = floor_div(5 * e + 2, 153);

        let day = e - floor_div(153 * m + 2, 5) + 1;
        let month = m + 3 - 12 * floor_div(m, 10);
        let year = 100 * b + d - 4800 + floor_div(m, 10);

        Ok(CalendarDate::new(year, month as u32, day as u32))
    }
}
