//! # climdex-grid
//!
//! In-memory data model shared by every climdex index.
//!
//! A [`DailyGrid`] is one calendar year of a daily variable laid out as
//! `(day, row, col)`. Indices reduce it along the day axis into an
//! [`IndexGrid`] of shape `(row, col)` where pixels that could not be computed
//! hold the [`MISSING`] sentinel. Spell indices additionally hand a
//! [`CarryState`] from one year to the next.
//!
//! Event predicates compare each day against a [`ThresholdProvider`], which
//! may vary by calendar day ([`DoyThresholds`]), by pixel only
//! ([`PixelThresholds`]) or not at all ([`ConstantThreshold`]).
//!
//! ```text
//!  YearSource ──load_year──▶ DailyGrid ──(index)──▶ IndexGrid
//!                                 ▲                    │
//!                  ThresholdProvider          CarryState (spell only)
//! ```

mod carry;
mod daily;
mod error;
mod index;
mod source;
mod threshold;

pub use carry::CarryState;
pub use daily::DailyGrid;
pub use error::GridError;
pub use index::{IndexGrid, MISSING, is_missing};
pub use source::{InMemorySource, YearSource};
pub use threshold::{
    Comparison, ConstantThreshold, DoyThresholds, PixelThresholds, ThresholdProvider,
};
