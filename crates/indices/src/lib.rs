//! # climdex-indices
//!
//! Annual per-pixel climate-extreme indices that need no state across
//! years: frost and icing days, diurnal range, thaw/freeze degree days,
//! temperature extremes, precipitation totals, counts and maxima, and
//! percentile-exceedance fractions.
//!
//! Every function reduces one year's [`DailyGrid`](climdex_grid::DailyGrid)
//! along the day axis into an [`IndexGrid`](climdex_grid::IndexGrid).
//! [`SimpleIndex`] names them all and dispatches from a [`YearInputs`]
//! bundle, which is what the command line uses.
//!
//! ## Missing values
//!
//! | Rule | Indices |
//! |------|---------|
//! | any invalid day | FD, ID, DTR, Thaw_Index, Freeze_Index, TFR |
//! | every day invalid | TXx, TXn, TNx, TNn, PRCPTOT, R1mm, R10mm, RX1day, RX5day, R95p |
//! | no wet day | SDII |
//! | no valid day | TX90p, TX10p, TN90p, TN10p |
//!
//! ## Quick Start
//!
//! ```ignore
//! use climdex_indices::{IndexConfig, SimpleIndex, Variable, YearInputs};
//!
//! let inputs = YearInputs::new().with_daily(Variable::Precip, &precip);
//! let rx5 = SimpleIndex::Rx5day.compute(&inputs, &IndexConfig::new())?;
//! ```

mod catalog;
mod config;
mod error;
mod exceedance;
mod precip;
mod series;
mod temperature;
mod thaw;

pub use catalog::{SimpleIndex, ThresholdKey, Variable, YearInputs};
pub use config::IndexConfig;
pub use error::IndexError;
pub use exceedance::exceedance_fraction;
pub use precip::{
    days_at_least, max_one_day, max_window_total, simple_daily_intensity, very_wet_day_excess,
    wet_day_total,
};
pub use temperature::{
    Extreme, annual_extreme, diurnal_temperature_range, frost_days, icing_days,
};
pub use thaw::{freeze_index, thaw_freeze_ratio, thaw_index};
