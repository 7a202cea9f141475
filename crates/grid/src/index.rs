//! Annual index output.

use climdex_calendar::format_band_label;
use ndarray::{Array2, ArrayView2};

/// Sentinel stored in pixels whose index could not be computed.
///
/// NaN is never a valid index value: counts, sums and extremes are always
/// finite numbers.
pub const MISSING: f64 = f64::NAN;

/// Whether `value` is the [`MISSING`] sentinel.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// One annual index value per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexGrid {
    name: String,
    year: i32,
    values: Array2<f64>,
}

impl IndexGrid {
    /// Wrap an already computed `(row, col)` array.
    pub fn new(name: impl Into<String>, year: i32, values: Array2<f64>) -> Self {
        Self {
            name: name.into(),
            year,
            values,
        }
    }

    /// Short index name, e.g. `WSDI`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar year the values describe.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Band label written alongside the values, e.g. `WSDI_1961`.
    pub fn label(&self) -> String {
        format_band_label(&self.name, self.year)
    }

    /// Spatial shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// All values, missing pixels included.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Consume the grid and return its values.
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Value of one pixel, `None` when missing or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values
            .get((row, col))
            .copied()
            .filter(|v| !is_missing(*v))
    }

    /// Number of missing pixels.
    pub fn n_missing(&self) -> usize {
        self.values.iter().filter(|v| is_missing(**v)).count()
    }

    /// Minimum and maximum over non-missing pixels.
    pub fn valid_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| !is_missing(*v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
