//! Precipitation indices.
//!
//! A wet day has precipitation at or above the configured wet-day
//! threshold (1 mm by default). Unless stated otherwise an index is missing
//! only when every day of the pixel is invalid.

use climdex_grid::{DailyGrid, IndexGrid, PixelThresholds, ThresholdProvider};

use crate::error::IndexError;
use crate::series::reduce_pixels;

/// PRCPTOT: total precipitation on wet days.
pub fn wet_day_total(precip: &DailyGrid, wet_day: f64) -> IndexGrid {
    reduce_pixels(precip, "PRCPTOT", |s| {
        if s.all_invalid() {
            return None;
        }
        Some(s.valid().filter(|&p| p >= wet_day).sum())
    })
}

/// Number of days with precipitation at or above `mm`, e.g. R1mm or R10mm.
pub fn days_at_least(precip: &DailyGrid, mm: f64, name: &str) -> IndexGrid {
    reduce_pixels(precip, name, |s| {
        if s.all_invalid() {
            return None;
        }
        Some(s.valid().filter(|&p| p >= mm).count() as f64)
    })
}

/// SDII: mean precipitation of wet days; missing when there are no wet days.
pub fn simple_daily_intensity(precip: &DailyGrid, wet_day: f64) -> IndexGrid {
    reduce_pixels(precip, "SDII", |s| {
        let (total, n) = s
            .valid()
            .filter(|&p| p >= wet_day)
            .fold((0.0, 0usize), |(t, n), p| (t + p, n + 1));
        (n > 0).then(|| total / n as f64)
    })
}

/// RX1day: largest daily precipitation.
pub fn max_one_day(precip: &DailyGrid) -> IndexGrid {
    reduce_pixels(precip, "RX1day", |s| s.valid().reduce(f64::max))
}

/// Largest precipitation total over `window` consecutive days, e.g. RX5day.
///
/// Invalid days contribute zero to a window. Missing when every day is
/// invalid or the year is shorter than the window.
pub fn max_window_total(precip: &DailyGrid, window: usize, name: &str) -> IndexGrid {
    reduce_pixels(precip, name, |s| {
        if s.all_invalid() || window == 0 || s.values.len() < window {
            return None;
        }
        let filled: Vec<f64> = s.values.iter().map(|v| v.unwrap_or(0.0)).collect();
        let mut sum: f64 = filled[..window].iter().sum();
        let mut best = sum;
        for i in window..filled.len() {
            sum += filled[i] - filled[i - window];
            best = best.max(sum);
        }
        Some(best)
    })
}

/// R95p: precipitation above the per-pixel very-wet-day threshold.
///
/// Sums `p - threshold` over wet days with `p > threshold`. Missing when every
/// day is invalid or the pixel has no threshold.
///
/// # Errors
///
/// Returns [`IndexError::Grid`] if `threshold` has a different shape.
pub fn very_wet_day_excess(
    precip: &DailyGrid,
    threshold: &PixelThresholds,
    wet_day: f64,
) -> Result<IndexGrid, IndexError> {
    threshold.check_shape(precip.shape())?;
    let table = threshold.values();
    Ok(reduce_pixels(precip, "R95p", |s| {
        let thr = table[[s.row, s.col]];
        if s.all_invalid() || !thr.is_finite() {
            return None;
        }
        Some(
            s.valid()
                .filter(|&p| p >= wet_day && p > thr)
                .map(|p| p - thr)
                .sum(),
        )
    }))
}
