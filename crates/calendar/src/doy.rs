//! Day-of-year newtype and leap-year rules for the Gregorian calendar.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Largest day-of-year in any Gregorian year.
pub const MAX_DAY_OF_YEAR: u16 = 366;

/// Day-of-year in the Gregorian calendar (1..=366).
///
/// The value is the ordinal of a date within its own year, so in a common
/// year 1 March is day 60 while in a leap year it is day 61. Threshold tables
/// are indexed with [`index`](Self::index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfYear(u16);

impl DayOfYear {
    /// Creates a new `DayOfYear`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=MAX_DAY_OF_YEAR).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a `DayOfYear` that must exist in `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] for values outside 1..=366 and
    /// [`CalendarError::DoyOutOfYear`] for day 366 of a common year.
    pub fn in_year(year: i32, doy: u16) -> Result<Self, CalendarError> {
        let d = Self::new(doy)?;
        let days = days_in_year(year);
        if doy > days {
            return Err(CalendarError::DoyOutOfYear { doy, year, days });
        }
        Ok(d)
    }

    /// Ordinal day of `date` within its year.
    pub fn from_date(date: NaiveDate) -> Self {
        // chrono guarantees 1..=366
        Self(date.ordinal() as u16)
    }

    /// Every day-of-year from 1 up to `last`, clamped to 366.
    pub(crate) fn up_to(last: u16) -> impl Iterator<Item = Self> {
        (1..=last.min(MAX_DAY_OF_YEAR)).map(Self)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Calendar date of this day in `year`, if the day exists there.
    pub fn to_date(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(year, u32::from(self.0))
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}
