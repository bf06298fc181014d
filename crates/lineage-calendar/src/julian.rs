//! Julian calendar: the Gregorian formula without the century corrections

use crate::converter::CalendarConverter;
use crate::date::floor_div;
use crate::gregorian::MONTH_DAYS;
use crate::error::Result;
use crate::CalendarDate;
use lineage_domain::CalendarSystem;

/// Julian converter
#[derive(Debug, Clone, Copy, Default)]
pub struct Julian;

impl Julian {
    /// Every fourth year is a leap year
    pub fn is_leap_year(year: i64) -> bool {
        year.rem_euclid(4) == 0
    }
}

impl CalendarConverter for Julian {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Julian
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

        i64::from(date.day) + floor_div(153 * m + 2, 5) + 365 * y + floor_div(y, 4) - 32083
    }

    fn from_jdn(&self, jdn: i64) -> Result<CalendarDate> {
        let c = jdn + 32082;
        let d = floor_div(4 * c + 3, 1461);
        let e = c - floor_div(1461 * d, 4);
        let m = floor_div(5 * e + 2, 153);

        let day = e - floor_div(153 * m + 2, 5) + 1;
        let month = m + 3 - 12 * floor_div(m, 10);
        let year = d - 4800 + floor_div(m, 10);

        Ok(CalendarDate::new(year, month as u32, day as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_reform_boundary() {
        // 4 October 1582 (Julian) was followed by 15 October 1582 (Gregorian)
        assert_eq!(Julian.jdn_of(CalendarDate::new(1582, 10, 4)), 2299160);
        assert_eq!(Julian.from_jdn(2299161).unwrap(), CalendarDate::new(1582, 10, 5));
    }

    #[test]
    fn test_century_leap_years() {
        assert!(Julian::is_leap_year(1900));
        assert_eq!(Julian.days_in_month(1900, 2), 29);
        assert_eq!(Julian.days_in_month(1901, 2), 28);
        assert_eq!(Julian.days_in_month(1901, 12), 31);
    }
}
