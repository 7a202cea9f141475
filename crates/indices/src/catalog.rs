//! Named catalogue of the annual indices and their inputs.

use std::fmt;
use std::str::FromStr;

use climdex_grid::{Comparison, DailyGrid, DoyThresholds, IndexGrid, PixelThresholds};
use tracing::debug;

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::exceedance::exceedance_fraction;
use crate::precip::{
    days_at_least, max_one_day, max_window_total, simple_daily_intensity, very_wet_day_excess,
    wet_day_total,
};
use crate::temperature::{
    Extreme, annual_extreme, diurnal_temperature_range, frost_days, icing_days,
};
use crate::thaw::{freeze_index, thaw_freeze_ratio, thaw_index};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Daily input variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Daily maximum temperature (°C).
    Tmax,
    /// Daily minimum temperature (°C).
    Tmin,
    /// Daily mean temperature (°C).
    Tmean,
    /// Daily precipitation (mm).
    Precip,
}

impl Variable {
    /// All variables in declaration order.
    pub const ALL: [Variable; 4] = [Self::Tmax, Self::Tmin, Self::Tmean, Self::Precip];

    /// Lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tmax => "tmax",
            Self::Tmin => "tmin",
            Self::Tmean => "tmean",
            Self::Precip => "precip",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Precomputed climatological threshold an index compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThresholdKey {
    /// 90th percentile of daily maximum temperature per calendar day.
    TxIn90,
    /// 10th percentile of daily maximum temperature per calendar day.
    TxIn10,
    /// 90th percentile of daily minimum temperature per calendar day.
    TnIn90,
    /// 10th percentile of daily minimum temperature per calendar day.
    TnIn10,
    /// 95th percentile of wet-day precipitation per pixel.
    PrWn95,
}

impl ThresholdKey {
    /// Every threshold, per-day tables first.
    pub const ALL: [ThresholdKey; 5] = [
        Self::TxIn90,
        Self::TxIn10,
        Self::TnIn90,
        Self::TnIn10,
        Self::PrWn95,
    ];

    /// Name used in configuration files and messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::TxIn90 => "TXin90",
            Self::TxIn10 => "TXin10",
            Self::TnIn90 => "TNin90",
            Self::TnIn10 => "TNin10",
            Self::PrWn95 => "PRwn95",
        }
    }

    /// Whether the threshold varies by calendar day.
    pub fn is_per_day(self) -> bool {
        !matches!(self, Self::PrWn95)
    }
}

/// Inputs available for one year.
#[derive(Debug, Clone, Default)]
pub struct YearInputs<'a> {
    daily: [Option<&'a DailyGrid>; 4],
    per_day: [Option<&'a DoyThresholds>; 4],
    prwn95: Option<&'a PixelThresholds>,
}

impl<'a> YearInputs<'a> {
    /// No inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the daily grid of `var`.
    pub fn with_daily(mut self, var: Variable, grid: &'a DailyGrid) -> Self {
        self.daily[var.slot()] = Some(grid);
        self
    }

    /// Provide a per-calendar-day threshold table.
    ///
    /// Ignored for [`ThresholdKey::PrWn95`], which is set with
    /// [`with_prwn95`](Self::with_prwn95).
    pub fn with_doy_thresholds(mut self, key: ThresholdKey, table: &'a DoyThresholds) -> Self {
        if let Some(slot) = Self::per_day_slot(key) {
            self.per_day[slot] = Some(table);
        }
        self
    }

    /// Provide the per-pixel very-wet-day threshold.
    pub fn with_prwn95(mut self, thresholds: &'a PixelThresholds) -> Self {
        self.prwn95 = Some(thresholds);
        self
    }

    /// Daily grid of `var`, if provided.
    pub fn daily(&self, var: Variable) -> Option<&'a DailyGrid> {
        self.daily[var.slot()]
    }

    fn per_day_slot(key: ThresholdKey) -> Option<usize> {
        match key {
            ThresholdKey::TxIn90 => Some(0),
            ThresholdKey::TxIn10 => Some(1),
            ThresholdKey::TnIn90 => Some(2),
            ThresholdKey::TnIn10 => Some(3),
            ThresholdKey::PrWn95 => None,
        }
    }

    fn require_daily(
        &self,
        index: SimpleIndex,
        var: Variable,
    ) -> Result<&'a DailyGrid, IndexError> {
        self.daily(var).ok_or_else(|| IndexError::MissingInput {
            index: index.name().to_string(),
            input: var.name().to_string(),
        })
    }

    fn require_per_day(
        &self,
        index: SimpleIndex,
        key: ThresholdKey,
    ) -> Result<&'a DoyThresholds, IndexError> {
        Self::per_day_slot(key)
            .and_then(|slot| self.per_day[slot])
            .ok_or_else(|| IndexError::MissingInput {
                index: index.name().to_string(),
                input: key.name().to_string(),
            })
    }

    fn require_prwn95(&self, index: SimpleIndex) -> Result<&'a PixelThresholds, IndexError> {
        self.prwn95.ok_or_else(|| IndexError::MissingInput {
            index: index.name().to_string(),
            input: ThresholdKey::PrWn95.name().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Index catalogue
// ---------------------------------------------------------------------------

/// Annual per-pixel index without cross-year state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimpleIndex {
    /// Frost days.
    Fd,
    /// Icing days.
    Id,
    /// Diurnal temperature range.
    Dtr,
    /// Thawing index.
    ThawIndex,
    /// Freezing index.
    FreezeIndex,
    /// Thaw/freeze ratio.
    Tfr,
    /// Annual maximum of daily maximum temperature.
    Txx,
    /// Annual minimum of daily maximum temperature.
    Txn,
    /// Annual maximum of daily minimum temperature.
    Tnx,
    /// Annual minimum of daily minimum temperature.
    Tnn,
    /// Wet-day precipitation total.
    Prcptot,
    /// Wet days.
    R1mm,
    /// Heavy precipitation days.
    R10mm,
    /// Simple daily intensity.
    Sdii,
    /// Maximum one-day precipitation.
    Rx1day,
    /// Maximum multi-day precipitation.
    Rx5day,
    /// Very-wet-day precipitation.
    R95p,
    /// Fraction of warm days.
    Tx90p,
    /// Fraction of cool days.
    Tx10p,
    /// Fraction of warm nights.
    Tn90p,
    /// Fraction of cold nights.
    Tn10p,
}

impl SimpleIndex {
    /// Every index in catalogue order.
    pub const ALL: [SimpleIndex; 21] = [
        Self::Fd,
        Self::Id,
        Self::Dtr,
        Self::ThawIndex,
        Self::FreezeIndex,
        Self::Tfr,
        Self::Txx,
        Self::Txn,
        Self::Tnx,
        Self::Tnn,
        Self::Prcptot,
        Self::R1mm,
        Self::R10mm,
        Self::Sdii,
        Self::Rx1day,
        Self::Rx5day,
        Self::R95p,
        Self::Tx90p,
        Self::Tx10p,
        Self::Tn90p,
        Self::Tn10p,
    ];

    /// Output name, also accepted by [`FromStr`] (case-insensitive).
    pub fn name(self) -> &'static str {
        match self {
            Self::Fd => "FD",
            Self::Id => "ID",
            Self::Dtr => "DTR",
            Self::ThawIndex => "Thaw_Index",
            Self::FreezeIndex => "Freeze_Index",
            Self::Tfr => "TFR",
            Self::Txx => "TXx",
            Self::Txn => "TXn",
            Self::Tnx => "TNx",
            Self::Tnn => "TNn",
            Self::Prcptot => "PRCPTOT",
            Self::R1mm => "R1mm",
            Self::R10mm => "R10mm",
            Self::Sdii => "SDII",
            Self::Rx1day => "RX1day",
            Self::Rx5day => "RX5day",
            Self::R95p => "R95p",
            Self::Tx90p => "TX90p",
            Self::Tx10p => "TX10p",
            Self::Tn90p => "TN90p",
            Self::Tn10p => "TN10p",
        }
    }

    /// Daily variables the index reads.
    pub fn variables(self) -> &'static [Variable] {
        use Variable::*;
        match self {
            Self::Fd | Self::Tnx | Self::Tnn | Self::Tn90p | Self::Tn10p => &[Tmin],
            Self::Id | Self::Txx | Self::Txn | Self::Tx90p | Self::Tx10p => &[Tmax],
            Self::Dtr => &[Tmax, Tmin],
            Self::ThawIndex | Self::FreezeIndex | Self::Tfr => &[Tmean],
            Self::Prcptot
            | Self::R1mm
            | Self::R10mm
            | Self::Sdii
            | Self::Rx1day
            | Self::Rx5day
            | Self::R95p => &[Precip],
        }
    }

    /// Threshold the index compares against, if any.
    pub fn threshold(self) -> Option<ThresholdKey> {
        match self {
            Self::R95p => Some(ThresholdKey::PrWn95),
            Self::Tx90p => Some(ThresholdKey::TxIn90),
            Self::Tx10p => Some(ThresholdKey::TxIn10),
            Self::Tn90p => Some(ThresholdKey::TnIn90),
            Self::Tn10p => Some(ThresholdKey::TnIn10),
            _ => None,
        }
    }

    /// Compute the index for one year.
    ///
    /// # Errors
    ///
    /// - [`IndexError::InvalidConfig`] if `config` does not validate.
    /// - [`IndexError::MissingInput`] if a required grid or threshold is absent.
    /// - Shape or calendar errors when inputs disagree.
    pub fn compute(
        self,
        inputs: &YearInputs<'_>,
        config: &IndexConfig,
    ) -> Result<IndexGrid, IndexError> {
        use Variable::*;
        config.validate()?;
        let name = self.name();
        let wet = config.wet_day_threshold();
        let grid = self.require_primary(inputs)?;
        debug!(index = name, year = grid.year(), "computing index");
        let exceed = |key: ThresholdKey, cmp: Comparison| {
            exceedance_fraction(grid, inputs.require_per_day(self, key)?, cmp, name)
        };

        let out = match self {
            Self::Fd => frost_days(grid),
            Self::Id => icing_days(grid),
            Self::Dtr => diurnal_temperature_range(grid, inputs.require_daily(self, Tmin)?)?,
            Self::ThawIndex => thaw_index(grid),
            Self::FreezeIndex => freeze_index(grid),
            Self::Tfr => thaw_freeze_ratio(grid, config),
            Self::Txx | Self::Tnx => annual_extreme(grid, Extreme::Max, name),
            Self::Txn | Self::Tnn => annual_extreme(grid, Extreme::Min, name),
            Self::Prcptot => wet_day_total(grid, wet),
            Self::R1mm => days_at_least(grid, wet, name),
            Self::R10mm => days_at_least(grid, config.heavy_precip_threshold(), name),
            Self::Sdii => simple_daily_intensity(grid, wet),
            Self::Rx1day => max_one_day(grid),
            Self::Rx5day => max_window_total(grid, config.max_window(), name),
            Self::R95p => very_wet_day_excess(grid, inputs.require_prwn95(self)?, wet)?,
            Self::Tx90p => exceed(ThresholdKey::TxIn90, Comparison::Above)?,
            Self::Tx10p => exceed(ThresholdKey::TxIn10, Comparison::Below)?,
            Self::Tn90p => exceed(ThresholdKey::TnIn90, Comparison::Above)?,
            Self::Tn10p => exceed(ThresholdKey::TnIn10, Comparison::Below)?,
        };
        Ok(out)
    }

    fn require_primary<'a>(self, inputs: &YearInputs<'a>) -> Result<&'a DailyGrid, IndexError> {
        let var = self.variables()[0];
        inputs.require_daily(self, var)
    }
}

impl fmt::Display for SimpleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimpleIndex {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IndexError::UnknownIndex {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn names_round_trip() {
        for index in SimpleIndex::ALL {
            assert_eq!(index.name().parse::<SimpleIndex>().unwrap(), index);
        }
        assert_eq!("rx5DAY".parse::<SimpleIndex>().unwrap(), SimpleIndex::Rx5day);
        assert!("WSDI".parse::<SimpleIndex>().is_err());
    }

    #[test]
    fn every_index_reads_a_variable() {
        for index in SimpleIndex::ALL {
            assert!(!index.variables().is_empty(), "{index}");
        }
    }

    #[test]
    fn thresholds_only_for_percentile_indices() {
        let with: Vec<_> = SimpleIndex::ALL
            .into_iter()
            .filter(|i| i.threshold().is_some())
            .collect();
        assert_eq!(
            with,
            vec![
                SimpleIndex::R95p,
                SimpleIndex::Tx90p,
                SimpleIndex::Tx10p,
                SimpleIndex::Tn90p,
                SimpleIndex::Tn10p
            ]
        );
        assert!(!ThresholdKey::PrWn95.is_per_day());
        assert!(ThresholdKey::TnIn10.is_per_day());
    }

    #[test]
    fn missing_inputs_reported() {
        let tmax = DailyGrid::full_year(1961, Array3::zeros((365, 1, 1))).unwrap();
        let inputs = YearInputs::new().with_daily(Variable::Tmax, &tmax);
        let err = SimpleIndex::Dtr
            .compute(&inputs, &IndexConfig::new())
            .unwrap_err();
        assert_eq!(
            err,
            IndexError::MissingInput {
                index: "DTR".into(),
                input: "tmin".into(),
            }
        );
        let err = SimpleIndex::Tx90p
            .compute(&inputs, &IndexConfig::new())
            .unwrap_err();
        assert_eq!(
            err,
            IndexError::MissingInput {
                index: "TX90p".into(),
                input: "TXin90".into(),
            }
        );
    }
}
