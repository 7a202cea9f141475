//! Error types for the climdex-calendar crate.

/// Error type for all fallible operations in the climdex-calendar crate.
///
/// Covers day-of-year values outside the Gregorian range, month/day pairs
/// that do not exist in a given year, and malformed band date labels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a day-of-year is beyond the length of its year.
    #[error("day of year {doy} does not exist in {year} ({days} days)")]
    DoyOutOfYear {
        /// The day-of-year value.
        doy: u16,
        /// The calendar year.
        year: i32,
        /// Number of days in that year.
        days: u16,
    },

    /// Returned when a month/day pair does not exist in the given year.
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Month number as parsed.
        month: u32,
        /// Day number as parsed.
        day: u32,
    },

    /// Returned when a band label is not of the form `YYYY-MM-DD`.
    #[error("malformed band label '{label}': {reason}")]
    MalformedLabel {
        /// The label as found in the raster.
        label: String,
        /// What was wrong with it.
        reason: String,
    },
}
