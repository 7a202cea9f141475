//! Per-day event classification.

use climdex_grid::{Comparison, DailyGrid, ThresholdProvider};
use ndarray::{Array2, Array3, ArrayView1, Axis, s};

use crate::error::SpellError;

/// Classification of one pixel on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DayClass {
    /// The value satisfies the event comparison against that day's threshold.
    Event = 0,
    /// The value is valid but does not satisfy the comparison.
    Quiet = 1,
    /// The value is missing. Skipped by run counting; taints the pixel.
    Invalid = 2,
}

impl DayClass {
    /// Classify a single value.
    #[inline]
    pub fn classify(valid: bool, value: f64, threshold: f64, cmp: Comparison) -> Self {
        if !valid {
            Self::Invalid
        } else if cmp.holds(value, threshold) {
            Self::Event
        } else {
            Self::Quiet
        }
    }
}

/// Event classification of every `(day, row, col)` cell of a daily grid.
///
/// Each day is compared with the threshold bound to its own calendar
/// day-of-year, not with a single scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMask {
    year: i32,
    classes: Array3<DayClass>,
}

impl EventMask {
    /// Classify `grid` against `thresholds`.
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::Grid`] if the thresholds were built for a
    /// different spatial shape.
    pub fn build<P>(grid: &DailyGrid, thresholds: &P, cmp: Comparison) -> Result<Self, SpellError>
    where
        P: ThresholdProvider + ?Sized,
    {
        thresholds.check_shape(grid.shape())?;
        let values = grid.values();
        let days = grid.days();
        let classes = Array3::from_shape_fn(values.dim(), |(d, r, c)| {
            let v = values[[d, r, c]];
            DayClass::classify(grid.is_valid(v), v, thresholds.threshold(days[d], r, c), cmp)
        });
        Ok(Self {
            year: grid.year(),
            classes,
        })
    }

    /// Calendar year of the source grid.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of classified days.
    pub fn n_days(&self) -> usize {
        self.classes.len_of(Axis(0))
    }

    /// Spatial shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.classes.dim();
        (rows, cols)
    }

    /// Day sequence of one pixel.
    pub fn pixel(&self, row: usize, col: usize) -> ArrayView1<'_, DayClass> {
        self.classes.slice(s![.., row, col])
    }

    /// Pixels with at least one invalid day.
    pub fn no_data(&self) -> Array2<bool> {
        self.classes
            .map_axis(Axis(0), |days| days.iter().any(|&d| d == DayClass::Invalid))
    }

    /// Number of event days per pixel.
    pub fn event_counts(&self) -> Array2<u32> {
        self.classes.map_axis(Axis(0), |days| {
            days.iter().filter(|&&d| d == DayClass::Event).count() as u32
        })
    }
}
