use approx::assert_relative_eq;
use climdex_grid::{
    Comparison, DailyGrid, DoyThresholds, GridError, InMemorySource, IndexGrid, MISSING,
    ThresholdProvider, YearSource,
};
use ndarray::{Array2, Array3};

/// Threshold table whose value on day `d` is `d` for every pixel.
fn ramp_thresholds(rows: usize, cols: usize) -> DoyThresholds {
    let table = Array3::from_shape_fn((366, rows, cols), |(d, _, _)| (d + 1) as f64);
    DoyThresholds::new(table).unwrap()
}

#[test]
fn grid_days_select_threshold_rows() {
    let labels = ["1961-02-28", "1961-03-01"];
    let values = Array3::from_elem((2, 1, 1), 59.5);
    let grid = DailyGrid::from_labels(1961, values, &labels).unwrap();
    let thresholds = ramp_thresholds(1, 1);

    let hits: Vec<bool> = grid
        .days()
        .iter()
        .zip(grid.pixel(0, 0))
        .map(|(&doy, &v)| Comparison::Above.holds(v, thresholds.threshold(doy, 0, 0)))
        .collect();
    // Day 59 threshold is 59, day 60 threshold is 60.
    assert_eq!(hits, vec![true, false]);
}

#[test]
fn threshold_shape_checked_against_grid() {
    let grid = DailyGrid::full_year(1962, Array3::zeros((365, 2, 3))).unwrap();
    assert!(ramp_thresholds(2, 3).check_shape(grid.shape()).is_ok());
    let err = ramp_thresholds(3, 3).check_shape(grid.shape()).unwrap_err();
    assert_eq!(
        err,
        GridError::DimensionMismatch {
            name: "threshold rows".into(),
            expected: 2,
            got: 3,
        }
    );
}

#[test]
fn source_reports_gaps_as_missing_year() {
    let source: InMemorySource = [1961, 1962, 1964]
        .into_iter()
        .map(|y| {
            let n = usize::from(climdex_calendar::days_in_year(y));
            DailyGrid::full_year(y, Array3::zeros((n, 1, 1))).unwrap()
        })
        .collect();

    let loaded: Vec<Result<i32, GridError>> = (1961..=1964)
        .map(|y| source.load_year(y).map(|g| g.year()))
        .collect();
    assert_eq!(loaded[0], Ok(1961));
    assert_eq!(loaded[1], Ok(1962));
    assert_eq!(loaded[2], Err(GridError::MissingYear { year: 1963 }));
    assert_eq!(loaded[3], Ok(1964));
}

#[test]
fn index_grid_range_skips_missing() {
    let mut values = Array2::from_elem((2, 2), MISSING);
    values[[0, 0]] = 0.25;
    values[[1, 1]] = 14.0;
    let grid = IndexGrid::new("CSDI", 1990, values);
    let (lo, hi) = grid.valid_range().unwrap();
    assert_relative_eq!(lo, 0.25);
    assert_relative_eq!(hi, 14.0);
    assert_eq!(grid.n_missing(), 2);
}
