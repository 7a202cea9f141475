//! Physical thresholds shared by the annual indices.

use crate::error::IndexError;

/// Configuration for the annual indices.
///
/// # Example
///
/// ```
/// use climdex_indices::IndexConfig;
///
/// let config = IndexConfig::new().with_wet_day_threshold(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct IndexConfig {
    wet_day_threshold: f64,
    heavy_precip_threshold: f64,
    max_window: usize,
    tfr_max: f64,
    freeze_min: f64,
}

impl IndexConfig {
    /// Creates a configuration with ETCCDI defaults.
    ///
    /// Defaults: wet day at 1 mm, heavy precipitation at 10 mm, 5-day
    /// maximum window, thaw/freeze ratio capped at 1000 and undefined below
    /// a freezing index of 1.
    pub fn new() -> Self {
        Self {
            wet_day_threshold: 1.0,
            heavy_precip_threshold: 10.0,
            max_window: 5,
            tfr_max: 1000.0,
            freeze_min: 1.0,
        }
    }

    /// Sets the wet-day threshold in mm.
    pub fn with_wet_day_threshold(mut self, mm: f64) -> Self {
        self.wet_day_threshold = mm;
        self
    }

    /// Sets the heavy-precipitation threshold in mm.
    pub fn with_heavy_precip_threshold(mut self, mm: f64) -> Self {
        self.heavy_precip_threshold = mm;
        self
    }

    /// Sets the window length of the multi-day precipitation maximum.
    pub fn with_max_window(mut self, days: usize) -> Self {
        self.max_window = days;
        self
    }

    /// Sets the largest thaw/freeze ratio that is still reported.
    pub fn with_tfr_max(mut self, max: f64) -> Self {
        self.tfr_max = max;
        self
    }

    /// Sets the smallest freezing index for which a ratio is defined.
    pub fn with_freeze_min(mut self, min: f64) -> Self {
        self.freeze_min = min;
        self
    }

    // --- Accessors ---

    /// Returns the wet-day threshold in mm.
    pub fn wet_day_threshold(&self) -> f64 {
        self.wet_day_threshold
    }

    /// Returns the heavy-precipitation threshold in mm.
    pub fn heavy_precip_threshold(&self) -> f64 {
        self.heavy_precip_threshold
    }

    /// Returns the window length of the multi-day precipitation maximum.
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Returns the thaw/freeze ratio cap.
    pub fn tfr_max(&self) -> f64 {
        self.tfr_max
    }

    /// Returns the smallest freezing index for which a ratio is defined.
    pub fn freeze_min(&self) -> f64 {
        self.freeze_min
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), IndexError> {
        for (name, v) in [
            ("wet_day_threshold", self.wet_day_threshold),
            ("heavy_precip_threshold", self.heavy_precip_threshold),
            ("freeze_min", self.freeze_min),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(IndexError::InvalidConfig {
                    reason: format!("{name} must be finite and non-negative, got {v}"),
                });
            }
        }
        if self.max_window == 0 {
            return Err(IndexError::InvalidConfig {
                reason: "max_window must be at least 1".to_string(),
            });
        }
        if !self.tfr_max.is_finite() || self.tfr_max <= 0.0 {
            return Err(IndexError::InvalidConfig {
                reason: format!("tfr_max must be finite and positive, got {}", self.tfr_max),
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = IndexConfig::new();
        assert_eq!(cfg.wet_day_threshold(), 1.0);
        assert_eq!(cfg.heavy_precip_threshold(), 10.0);
        assert_eq!(cfg.max_window(), 5);
        assert_eq!(cfg.tfr_max(), 1000.0);
        assert_eq!(cfg.freeze_min(), 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(
            IndexConfig::new()
                .with_wet_day_threshold(-0.1)
                .validate()
                .is_err()
        );
        assert!(
            IndexConfig::new()
                .with_heavy_precip_threshold(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(IndexConfig::new().with_max_window(0).validate().is_err());
        assert!(IndexConfig::new().with_tfr_max(0.0).validate().is_err());
    }
}
