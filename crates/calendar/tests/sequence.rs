use climdex_calendar::{days_in_year, year_dates, year_days};

#[test]
fn year_days_are_contiguous() {
    for year in [1961, 1964, 1900, 2000] {
        let days = year_days(year);
        assert_eq!(days.len(), usize::from(days_in_year(year)));
        for (i, d) in days.iter().enumerate() {
            assert_eq!(d.index(), i, "year {year}: gap at position {i}");
        }
    }
}

#[test]
fn year_dates_stay_in_year() {
    let dates = year_dates(1964);
    assert_eq!(dates.len(), 366);
    assert!(dates.iter().all(|d| d.format("%Y").to_string() == "1964"));
}
