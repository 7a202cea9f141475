//! Band date labels.
//!
//! Daily rasters carry one `YYYY-MM-DD` label per band. Only the month and
//! day of a label are trusted: the year component is taken from the file the
//! band belongs to.

use chrono::NaiveDate;

use crate::doy::DayOfYear;
use crate::error::CalendarError;

/// Parse a `YYYY-MM-DD` label into its `(year, month, day)` fields.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedLabel`] if the label does not have three
/// `-` separated integer fields.
pub fn parse_band_label(label: &str) -> Result<(i32, u32, u32), CalendarError> {
    let malformed = |reason: &str| CalendarError::MalformedLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = label.trim();
    let parts: Vec<&str> = trimmed.split('-').collect();
    if parts.len() != 3 {
        return Err(malformed("expected 3 '-' separated fields"));
    }

    let year = parts[0]
        .parse::<i32>()
        .map_err(|_| malformed("year is not an integer"))?;
    let month = parts[1]
        .parse::<u32>()
        .map_err(|_| malformed("month is not an integer"))?;
    let day = parts[2]
        .parse::<u32>()
        .map_err(|_| malformed("day is not an integer"))?;

    Ok((year, month, day))
}

/// Day-of-year of a band label, evaluated in `year`.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedLabel`] for unparseable labels and
/// [`CalendarError::InvalidDate`] when the month/day does not exist in
/// `year` (29 February of a common year).
pub fn day_of_year_from_label(year: i32, label: &str) -> Result<DayOfYear, CalendarError> {
    let (_, month, day) = parse_band_label(label)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarError::InvalidDate { year, month, day })?;
    Ok(DayOfYear::from_date(date))
}

/// Output band label for an annual index, e.g. `WSDI_1961`.
pub fn format_band_label(index_name: &str, year: i32) -> String {
    format!("{index_name}_{year}")
}
