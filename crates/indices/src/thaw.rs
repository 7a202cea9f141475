//! Thawing and freezing degree-day indices.

use climdex_grid::{DailyGrid, IndexGrid};

use crate::config::IndexConfig;
use crate::series::reduce_pixels;

fn positive_sum(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v > 0.0).sum()
}

fn negative_magnitude(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v < 0.0).map(|v| v.abs()).sum()
}

/// Sum of daily mean temperatures above 0 °C; missing if any day is invalid.
pub fn thaw_index(tmean: &DailyGrid) -> IndexGrid {
    reduce_pixels(tmean, "Thaw_Index", |s| s.complete().map(|v| positive_sum(&v)))
}

/// Sum of magnitudes of daily mean temperatures below 0 °C; missing if any
/// day is invalid.
pub fn freeze_index(tmean: &DailyGrid) -> IndexGrid {
    reduce_pixels(tmean, "Freeze_Index", |s| {
        s.complete().map(|v| negative_magnitude(&v))
    })
}

/// TFR: thawing index divided by freezing index.
///
/// Missing if any day is invalid, if the freezing index is below
/// [`IndexConfig::freeze_min`], or if the ratio exceeds [`IndexConfig::tfr_max`].
pub fn thaw_freeze_ratio(tmean: &DailyGrid, config: &IndexConfig) -> IndexGrid {
    let (freeze_min, tfr_max) = (config.freeze_min(), config.tfr_max());
    reduce_pixels(tmean, "TFR", |s| {
        let values = s.complete()?;
        let freeze = negative_magnitude(&values);
        if freeze < freeze_min {
            return None;
        }
        let ratio = positive_sum(&values) / freeze;
        (ratio <= tfr_max).then_some(ratio)
    })
}
