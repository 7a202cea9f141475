//! Per-pixel reduction helpers.

use climdex_calendar::DayOfYear;
use climdex_grid::{DailyGrid, IndexGrid, MISSING};
use ndarray::Array2;
use rayon::prelude::*;

use crate::error::IndexError;

/// One pixel's daily series with invalid days as `None`.
#[derive(Debug, Clone)]
pub(crate) struct PixelSeries<'a> {
    pub row: usize,
    pub col: usize,
    pub days: &'a [DayOfYear],
    pub values: Vec<Option<f64>>,
}

impl<'a> PixelSeries<'a> {
    fn extract(grid: &'a DailyGrid, row: usize, col: usize) -> Self {
        let values = grid
            .pixel(row, col)
            .iter()
            .map(|&v| grid.is_valid(v).then_some(v))
            .collect();
        Self {
            row,
            col,
            days: grid.days(),
            values,
        }
    }

    /// Valid values in day order.
    pub fn valid(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    pub fn any_invalid(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    pub fn all_invalid(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Every value, or `None` if any day is invalid.
    pub fn complete(&self) -> Option<Vec<f64>> {
        self.values.iter().copied().collect()
    }
}

/// Reduce every pixel of `grid` to one value; `None` becomes [`MISSING`].
pub(crate) fn reduce_pixels<F>(grid: &DailyGrid, name: &str, f: F) -> IndexGrid
where
    F: Fn(&PixelSeries<'_>) -> Option<f64> + Sync,
{
    let (rows, cols) = grid.shape();
    let values: Vec<f64> = (0..rows * cols)
        .into_par_iter()
        .map(|i| {
            let series = PixelSeries::extract(grid, i / cols, i % cols);
            f(&series).unwrap_or(MISSING)
        })
        .collect();
    IndexGrid::new(
        name,
        grid.year(),
        Array2::from_shape_fn((rows, cols), |(r, c)| values[r * cols + c]),
    )
}

/// Check that `other` covers the same pixels and days as `primary`.
pub(crate) fn check_paired(
    primary: &DailyGrid,
    other: &DailyGrid,
    what: &str,
) -> Result<(), IndexError> {
    if other.shape() != primary.shape() {
        return Err(IndexError::ShapeMismatch {
            what: what.to_string(),
            expected: primary.shape(),
            got: other.shape(),
        });
    }
    if other.year() != primary.year() {
        return Err(IndexError::CalendarMismatch {
            what: what.to_string(),
            reason: format!("year {}, expected {}", other.year(), primary.year()),
        });
    }
    if other.days() != primary.days() {
        return Err(IndexError::CalendarMismatch {
            what: what.to_string(),
            reason: format!(
                "{} days, expected {} matching days",
                other.n_days(),
                primary.n_days()
            ),
        });
    }
    Ok(())
}

/// Reduce every pixel of two same-day grids to one value.
pub(crate) fn reduce_pixel_pairs<F>(
    a: &DailyGrid,
    b: &DailyGrid,
    what: &str,
    name: &str,
    f: F,
) -> Result<IndexGrid, IndexError>
where
    F: Fn(&PixelSeries<'_>, &PixelSeries<'_>) -> Option<f64> + Sync,
{
    check_paired(a, b, what)?;
    let (rows, cols) = a.shape();
    let values: Vec<f64> = (0..rows * cols)
        .into_par_iter()
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            f(&PixelSeries::extract(a, r, c), &PixelSeries::extract(b, r, c)).unwrap_or(MISSING)
        })
        .collect();
    Ok(IndexGrid::new(
        name,
        a.year(),
        Array2::from_shape_fn((rows, cols), |(r, c)| values[r * cols + c]),
    ))
}
