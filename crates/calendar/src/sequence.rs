//! Day sequences covering one calendar year.

use chrono::NaiveDate;

use crate::doy::{DayOfYear, days_in_year};

/// Every day-of-year of `year` in order (365 or 366 entries).
pub fn year_days(year: i32) -> Vec<DayOfYear> {
    DayOfYear::up_to(days_in_year(year)).collect()
}

/// Every date of `year` in order.
///
/// Returns an empty vector for years chrono cannot represent.
pub fn year_dates(year: i32) -> Vec<NaiveDate> {
    year_days(year)
        .into_iter()
        .filter_map(|d| d.to_date(year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_year_length() {
        let days = year_days(1961);
        assert_eq!(days.len(), 365);
        assert_eq!(days[0].get(), 1);
        assert_eq!(days[364].get(), 365);
    }

    #[test]
    fn leap_year_length() {
        assert_eq!(year_days(1964).len(), 366);
    }

    #[test]
    fn dates_cover_year() {
        let dates = year_dates(2000);
        assert_eq!(dates.len(), 366);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(dates[59], NaiveDate::from_ymd_opt(2000, 2, 29).unwrap());
        assert_eq!(*dates.last().unwrap(), NaiveDate::from_ymd_opt(2000, 12, 31).unwrap());
    }
}
