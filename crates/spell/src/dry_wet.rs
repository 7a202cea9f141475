//! Consecutive dry days (CDD) and consecutive wet days (CWD).
//!
//! Two counters run over one year without carry and without a minimum
//! length: every day extends one counter and resets the other, and the
//! yearly index is the longest streak each counter reached.

use climdex_grid::{DailyGrid, IndexGrid, MISSING};
use ndarray::Array2;
use rayon::prelude::*;

use crate::error::SpellError;

/// Daily precipitation (mm) from which a day counts as wet.
pub const DEFAULT_WET_DAY_THRESHOLD: f64 = 1.0;

/// Configuration for [`dry_wet_spells`].
#[derive(Debug, Clone)]
pub struct DryWetConfig {
    wet_day_threshold: f64,
}

impl DryWetConfig {
    /// Creates a configuration with the 1 mm wet-day threshold.
    pub fn new() -> Self {
        Self {
            wet_day_threshold: DEFAULT_WET_DAY_THRESHOLD,
        }
    }

    /// Sets the wet-day threshold in mm.
    pub fn with_wet_day_threshold(mut self, threshold: f64) -> Self {
        self.wet_day_threshold = threshold;
        self
    }

    /// Returns the wet-day threshold in mm.
    pub fn wet_day_threshold(&self) -> f64 {
        self.wet_day_threshold
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SpellError> {
        if !self.wet_day_threshold.is_finite() || self.wet_day_threshold < 0.0 {
            return Err(SpellError::InvalidConfig {
                reason: format!(
                    "wet_day_threshold must be finite and non-negative, got {}",
                    self.wet_day_threshold
                ),
            });
        }
        Ok(())
    }
}

impl Default for DryWetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest dry and wet streaks of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    /// Longest run of dry days.
    pub dry: u32,
    /// Longest run of wet days.
    pub wet: u32,
}

/// Dry/wet streak counters for one pixel.
#[derive(Debug, Clone, Default)]
pub struct StreakCounter {
    dry: u32,
    wet: u32,
    longest: Streaks,
    n_valid: usize,
}

impl StreakCounter {
    /// Fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one day.
    ///
    /// A day is dry only if it is valid and below the threshold; an invalid
    /// day falls on the wet side.
    pub fn advance(&mut self, valid: bool, value: f64, threshold: f64) {
        if valid {
            self.n_valid += 1;
        }
        if valid && value < threshold {
            self.dry += 1;
            self.wet = 0;
            self.longest.dry = self.longest.dry.max(self.dry);
        } else {
            self.wet += 1;
            self.dry = 0;
            self.longest.wet = self.longest.wet.max(self.wet);
        }
    }

    /// Longest streaks, or `None` if no day was valid.
    pub fn finish(self) -> Option<Streaks> {
        (self.n_valid > 0).then_some(self.longest)
    }
}

/// CDD and CWD grids for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct DryWetYear {
    /// Consecutive dry days.
    pub cdd: IndexGrid,
    /// Consecutive wet days.
    pub cwd: IndexGrid,
}

/// Compute CDD and CWD for one year of daily precipitation.
///
/// A pixel is missing only when every day is invalid.
///
/// # Errors
///
/// Returns [`SpellError::InvalidConfig`] if `config` does not validate.
pub fn dry_wet_spells(grid: &DailyGrid, config: &DryWetConfig) -> Result<DryWetYear, SpellError> {
    config.validate()?;
    let threshold = config.wet_day_threshold();
    let shape = grid.shape();
    let cols = shape.1;

    let pixels: Vec<Option<Streaks>> = (0..shape.0 * cols)
        .into_par_iter()
        .map(|i| {
            let mut counter = StreakCounter::new();
            for &v in grid.pixel(i / cols, i % cols) {
                counter.advance(grid.is_valid(v), v, threshold);
            }
            counter.finish()
        })
        .collect();

    let pick = |f: fn(Streaks) -> u32| {
        Array2::from_shape_fn(shape, |(r, c)| {
            pixels[r * cols + c].map_or(MISSING, |s| f64::from(f(s)))
        })
    };
    Ok(DryWetYear {
        cdd: IndexGrid::new("CDD", grid.year(), pick(|s| s.dry)),
        cwd: IndexGrid::new("CWD", grid.year(), pick(|s| s.wet)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use climdex_grid::is_missing;
    use ndarray::Array3;

    fn grid(values: &[f64]) -> DailyGrid {
        let mut full = Array3::from_elem((365, 1, 1), 5.0);
        for (i, &v) in values.iter().enumerate() {
            full[[i, 0, 0]] = v;
        }
        DailyGrid::full_year(1971, full).unwrap()
    }

    fn streaks(values: &[f64]) -> Option<Streaks> {
        let mut counter = StreakCounter::new();
        for &v in values {
            counter.advance(v.is_finite(), v, 1.0);
        }
        counter.finish()
    }

    #[test]
    fn longest_streaks() {
        let s = streaks(&[0.0, 0.0, 0.0, 2.0, 2.0, 0.0, 3.0, 3.0, 3.0, 3.0]).unwrap();
        assert_eq!(s, Streaks { dry: 3, wet: 4 });
    }

    #[test]
    fn threshold_is_wet() {
        let s = streaks(&[1.0, 0.99, 1.0]).unwrap();
        assert_eq!(s, Streaks { dry: 1, wet: 1 });
    }

    #[test]
    fn invalid_day_counts_as_wet() {
        let s = streaks(&[0.0, 0.0, f64::NAN, 0.0]).unwrap();
        assert_eq!(s, Streaks { dry: 2, wet: 1 });
    }

    #[test]
    fn all_invalid_is_none() {
        assert_eq!(streaks(&[f64::NAN; 10]), None);
        assert_eq!(streaks(&[]), None);
    }

    #[test]
    fn grid_outputs() {
        let mut values = vec![0.0; 20];
        values[10] = 4.0;
        let out = dry_wet_spells(&grid(&values), &DryWetConfig::new()).unwrap();
        assert_eq!(out.cdd.get(0, 0), Some(10.0));
        // Days 20..365 stay at 5 mm.
        assert_eq!(out.cwd.get(0, 0), Some(345.0));
        assert_eq!(out.cdd.label(), "CDD_1971");
    }

    #[test]
    fn grid_all_invalid_pixel_missing() {
        let g = DailyGrid::full_year(1971, Array3::from_elem((365, 1, 2), f64::NAN)).unwrap();
        let out = dry_wet_spells(&g, &DryWetConfig::new()).unwrap();
        assert!(is_missing(out.cdd.values()[[0, 1]]));
        assert!(is_missing(out.cwd.values()[[0, 0]]));
    }

    #[test]
    fn validate_threshold() {
        assert!(DryWetConfig::new().validate().is_ok());
        assert!(
            DryWetConfig::new()
                .with_wet_day_threshold(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            DryWetConfig::new()
                .with_wet_day_threshold(-1.0)
                .validate()
                .is_err()
        );
    }
}
