//! Temperature indices: day counts, diurnal range and annual extremes.

use climdex_grid::{DailyGrid, IndexGrid};

use crate::error::IndexError;
use crate::series::{reduce_pixel_pairs, reduce_pixels};

/// Which end of the distribution [`annual_extreme`] picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Largest valid value.
    Max,
    /// Smallest valid value.
    Min,
}

/// Number of days with a value below 0 °C; missing if any day is invalid.
fn count_below_zero(grid: &DailyGrid, name: &str) -> IndexGrid {
    reduce_pixels(grid, name, |s| {
        let values = s.complete()?;
        Some(values.iter().filter(|&&v| v < 0.0).count() as f64)
    })
}

/// FD: days with daily minimum temperature below 0 °C.
pub fn frost_days(tmin: &DailyGrid) -> IndexGrid {
    count_below_zero(tmin, "FD")
}

/// ID: days with daily maximum temperature below 0 °C.
pub fn icing_days(tmax: &DailyGrid) -> IndexGrid {
    count_below_zero(tmax, "ID")
}

/// DTR: mean of daily maximum minus daily minimum temperature.
///
/// Missing if any day of either grid is invalid.
///
/// # Errors
///
/// Returns [`IndexError::ShapeMismatch`] or [`IndexError::CalendarMismatch`]
/// if the grids do not cover the same pixels and days.
pub fn diurnal_temperature_range(
    tmax: &DailyGrid,
    tmin: &DailyGrid,
) -> Result<IndexGrid, IndexError> {
    reduce_pixel_pairs(tmax, tmin, "tmin", "DTR", |tx, tn| {
        let tx = tx.complete()?;
        let tn = tn.complete()?;
        let sum: f64 = tx.iter().zip(&tn).map(|(x, n)| x - n).sum();
        Some(sum / tx.len() as f64)
    })
}

/// Largest or smallest valid value of the year; missing if every day is invalid.
pub fn annual_extreme(grid: &DailyGrid, extreme: Extreme, name: &str) -> IndexGrid {
    reduce_pixels(grid, name, |s| match extreme {
        Extreme::Max => s.valid().reduce(f64::max),
        Extreme::Min => s.valid().reduce(f64::min),
    })
}
