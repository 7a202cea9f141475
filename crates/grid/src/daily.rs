//! One calendar year of a daily gridded variable.

use climdex_calendar::{DayOfYear, day_of_year_from_label, days_in_year, year_days};
use ndarray::{Array3, ArrayView1, ArrayView3, s};

use crate::error::GridError;

/// Daily values for one calendar year, laid out as `(day, row, col)`.
///
/// Each entry of the day axis is bound to the calendar [`DayOfYear`] it was
/// observed on. Day-of-year values must be strictly increasing and must exist
/// in the grid's year, so a common year never carries day 366.
///
/// A value is invalid when it is not finite or equals the optional no-data
/// marker. Invalid values never make construction fail; they are handled per
/// pixel by the indices.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyGrid {
    year: i32,
    values: Array3<f64>,
    days: Vec<DayOfYear>,
    no_data: Option<f64>,
}

impl DailyGrid {
    /// Create a grid from values and the day-of-year of every band.
    ///
    /// # Errors
    ///
    /// - [`GridError::EmptyGrid`] if any axis has length zero.
    /// - [`GridError::DimensionMismatch`] if `days.len()` differs from the day axis.
    /// - [`GridError::Validation`] if days are not strictly increasing or do
    ///   not exist in `year`.
    pub fn new(year: i32, values: Array3<f64>, days: Vec<DayOfYear>) -> Result<Self, GridError> {
        let (n_days, rows, cols) = values.dim();
        if n_days == 0 || rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { year });
        }
        if days.len() != n_days {
            return Err(GridError::DimensionMismatch {
                name: "day".into(),
                expected: n_days,
                got: days.len(),
            });
        }

        let year_len = days_in_year(year);
        let mut problems = Vec::new();
        for (i, d) in days.iter().enumerate() {
            if d.get() > year_len {
                problems.push(format!(
                    "band {i}: day {} does not exist in {year}",
                    d.get()
                ));
            }
            if i > 0 && days[i - 1] >= *d {
                problems.push(format!(
                    "band {i}: day {} does not follow day {}",
                    d.get(),
                    days[i - 1].get()
                ));
            }
        }
        if !problems.is_empty() {
            return Err(GridError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            });
        }

        Ok(Self {
            year,
            values,
            days,
            no_data: None,
        })
    }

    /// Create a grid covering every day of `year` in order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the day axis is not
    /// exactly 365 or 366 long as `year` requires.
    pub fn full_year(year: i32, values: Array3<f64>) -> Result<Self, GridError> {
        Self::new(year, values, year_days(year))
    }

    /// Create a grid from one `YYYY-MM-DD` label per band.
    ///
    /// Only the month and day of each label are used; they are evaluated in
    /// `year`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Calendar`] for labels that cannot be placed in
    /// `year`, plus everything [`new`](Self::new) can return.
    pub fn from_labels<S: AsRef<str>>(
        year: i32,
        values: Array3<f64>,
        labels: &[S],
    ) -> Result<Self, GridError> {
        let days = labels
            .iter()
            .map(|l| day_of_year_from_label(year, l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(year, values, days)
    }

    /// Treat `marker` as an additional no-data value.
    pub fn with_no_data(mut self, marker: f64) -> Self {
        self.no_data = Some(marker);
        self
    }

    /// Calendar year of this grid.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of days on the day axis.
    pub fn n_days(&self) -> usize {
        self.days.len()
    }

    /// Spatial shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.values.dim();
        (rows, cols)
    }

    /// Day-of-year bound to every entry of the day axis.
    pub fn days(&self) -> &[DayOfYear] {
        &self.days
    }

    /// Full `(day, row, col)` value array.
    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// The optional no-data marker.
    pub fn no_data(&self) -> Option<f64> {
        self.no_data
    }

    /// Daily series of one pixel.
    pub fn pixel(&self, row: usize, col: usize) -> ArrayView1<'_, f64> {
        self.values.slice(s![.., row, col])
    }

    /// Whether `value` is a usable measurement for this grid.
    #[inline]
    pub fn is_valid(&self, value: f64) -> bool {
        value.is_finite() && self.no_data.is_none_or(|m| value != m)
    }

    /// The first `n` days of this grid (fewer if the grid is shorter).
    ///
    /// Used to build the lookahead window from the start of the next year.
    pub fn leading(&self, n: usize) -> Self {
        let n = n.min(self.n_days());
        Self {
            year: self.year,
            values: self.values.slice(s![..n, .., ..]).to_owned(),
            days: self.days[..n].to_vec(),
            no_data: self.no_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doys(values: &[u16]) -> Vec<DayOfYear> {
        values.iter().map(|&d| DayOfYear::new(d).unwrap()).collect()
    }

    #[test]
    fn new_valid() {
        let grid = DailyGrid::new(1961, Array3::zeros((3, 2, 4)), doys(&[1, 2, 3])).unwrap();
        assert_eq!(grid.year(), 1961);
        assert_eq!(grid.n_days(), 3);
        assert_eq!(grid.shape(), (2, 4));
    }

    #[test]
    fn new_day_count_mismatch() {
        let err = DailyGrid::new(1961, Array3::zeros((3, 1, 1)), doys(&[1, 2])).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                name: "day".into(),
                expected: 3,
                got: 2,
            }
        );
    }

    #[test]
    fn new_empty() {
        let err = DailyGrid::new(1961, Array3::zeros((0, 1, 1)), vec![]).unwrap_err();
        assert_eq!(err, GridError::EmptyGrid { year: 1961 });
    }

    #[test]
    fn new_rejects_day_366_in_common_year() {
        let err = DailyGrid::new(1961, Array3::zeros((1, 1, 1)), doys(&[366])).unwrap_err();
        assert!(matches!(err, GridError::Validation { count: 1, .. }));
    }

    #[test]
    fn new_rejects_unordered_days() {
        let err = DailyGrid::new(1961, Array3::zeros((3, 1, 1)), doys(&[1, 3, 2])).unwrap_err();
        assert!(matches!(err, GridError::Validation { .. }));
    }

    #[test]
    fn full_year_leap_aware() {
        assert!(DailyGrid::full_year(1964, Array3::zeros((366, 1, 1))).is_ok());
        assert!(DailyGrid::full_year(1961, Array3::zeros((366, 1, 1))).is_err());
    }

    #[test]
    fn from_labels_binds_days() {
        let labels = ["1961-02-28", "1961-03-01"];
        let grid = DailyGrid::from_labels(1961, Array3::zeros((2, 1, 1)), &labels).unwrap();
        assert_eq!(grid.days()[0].get(), 59);
        assert_eq!(grid.days()[1].get(), 60);
    }

    #[test]
    fn from_labels_bad_label() {
        let labels = ["1961-02-29"];
        let err = DailyGrid::from_labels(1961, Array3::zeros((1, 1, 1)), &labels).unwrap_err();
        assert!(matches!(err, GridError::Calendar { .. }));
    }

    #[test]
    fn validity_rules() {
        let grid = DailyGrid::full_year(1961, Array3::zeros((365, 1, 1)))
            .unwrap()
            .with_no_data(-9999.0);
        assert!(grid.is_valid(0.0));
        assert!(!grid.is_valid(f64::NAN));
        assert!(!grid.is_valid(f64::INFINITY));
        assert!(!grid.is_valid(-9999.0));
    }

    #[test]
    fn leading_window() {
        let mut values = Array3::zeros((365, 1, 1));
        for d in 0..365 {
            values[[d, 0, 0]] = d as f64;
        }
        let grid = DailyGrid::full_year(1962, values).unwrap();
        let lead = grid.leading(6);
        assert_eq!(lead.n_days(), 6);
        assert_eq!(lead.pixel(0, 0).to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(lead.days()[5].get(), 6);

        let short = DailyGrid::new(1962, Array3::zeros((2, 1, 1)), doys(&[1, 2])).unwrap();
        assert_eq!(short.leading(6).n_days(), 2);
    }
}
