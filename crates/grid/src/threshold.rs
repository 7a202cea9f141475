//! Threshold providers and event comparisons.
//!
//! Climatological thresholds (for example the 90th percentile of daily
//! maximum temperature in a 5-day window around each calendar day) are
//! computed elsewhere and only looked up here.

use climdex_calendar::{DayOfYear, MAX_DAY_OF_YEAR};
use ndarray::{Array2, Array3, Axis};

use crate::error::GridError;

/// How a daily value is compared against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `value > threshold`
    Above,
    /// `value < threshold`
    Below,
    /// `value >= threshold`
    AtLeast,
    /// `value <= threshold`
    AtMost,
}

impl Comparison {
    /// Evaluate the comparison. A NaN on either side never satisfies it.
    #[inline]
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Above => value > threshold,
            Self::Below => value < threshold,
            Self::AtLeast => value >= threshold,
            Self::AtMost => value <= threshold,
        }
    }
}

/// Per-pixel threshold for a calendar day.
///
/// Implementations are shared read-only across the pixel workers of a year.
pub trait ThresholdProvider: Send + Sync {
    /// Threshold that applies to pixel `(row, col)` on calendar day `doy`.
    fn threshold(&self, doy: DayOfYear, row: usize, col: usize) -> f64;

    /// Spatial shape the provider was built for, `None` if it fits any grid.
    fn shape(&self) -> Option<(usize, usize)>;

    /// Check that this provider can serve a grid of shape `(rows, cols)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] naming the first axis that differs.
    fn check_shape(&self, shape: (usize, usize)) -> Result<(), GridError> {
        let Some((rows, cols)) = self.shape() else {
            return Ok(());
        };
        if rows != shape.0 {
            return Err(GridError::DimensionMismatch {
                name: "threshold rows".into(),
                expected: shape.0,
                got: rows,
            });
        }
        if cols != shape.1 {
            return Err(GridError::DimensionMismatch {
                name: "threshold cols".into(),
                expected: shape.1,
                got: cols,
            });
        }
        Ok(())
    }
}

/// A threshold table with one `(row, col)` layer per calendar day 1..=366.
#[derive(Debug, Clone)]
pub struct DoyThresholds {
    table: Array3<f64>,
}

impl DoyThresholds {
    /// Wrap a `(366, rows, cols)` table.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the first axis is not 366 long.
    pub fn new(table: Array3<f64>) -> Result<Self, GridError> {
        let n = table.len_of(Axis(0));
        if n != usize::from(MAX_DAY_OF_YEAR) {
            return Err(GridError::DimensionMismatch {
                name: "threshold day".into(),
                expected: usize::from(MAX_DAY_OF_YEAR),
                got: n,
            });
        }
        Ok(Self { table })
    }

    /// Underlying `(366, rows, cols)` table.
    pub fn table(&self) -> &Array3<f64> {
        &self.table
    }
}

impl ThresholdProvider for DoyThresholds {
    #[inline]
    fn threshold(&self, doy: DayOfYear, row: usize, col: usize) -> f64 {
        self.table[[doy.index(), row, col]]
    }

    fn shape(&self) -> Option<(usize, usize)> {
        let (_, rows, cols) = self.table.dim();
        Some((rows, cols))
    }
}

/// One threshold per pixel, identical for every calendar day.
#[derive(Debug, Clone)]
pub struct PixelThresholds {
    values: Array2<f64>,
}

impl PixelThresholds {
    /// Wrap a `(rows, cols)` array.
    pub fn new(values: Array2<f64>) -> Self {
        Self { values }
    }

    /// Underlying `(rows, cols)` array.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

impl ThresholdProvider for PixelThresholds {
    #[inline]
    fn threshold(&self, _doy: DayOfYear, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }

    fn shape(&self) -> Option<(usize, usize)> {
        Some(self.values.dim())
    }
}

/// A fixed physical threshold, e.g. 1 mm for a wet day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantThreshold(pub f64);

impl ThresholdProvider for ConstantThreshold {
    #[inline]
    fn threshold(&self, _doy: DayOfYear, _row: usize, _col: usize) -> f64 {
        self.0
    }

    fn shape(&self) -> Option<(usize, usize)> {
        None
    }
}
