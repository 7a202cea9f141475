//! # climdex-calendar
//!
//! Gregorian calendar arithmetic for yearly daily rasters.
//!
//! Every input raster holds one calendar year, one band per day, and each
//! band carries a `YYYY-MM-DD` date label. Thresholds are tabulated per
//! calendar day-of-year (1..=366), so the bridge between the two is the
//! ordinal day of a band's month/day within the raster's own year.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["band label YYYY-MM-DD"] -->|"day_of_year_from_label()"| B["DayOfYear (1..=366)"]
//!     C["year"] -->|"year_days()"| D["Vec of DayOfYear"]
//!     B -->|".index()"| E["threshold table row"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use climdex_calendar::{DayOfYear, day_of_year_from_label, days_in_year};
//!
//! assert_eq!(days_in_year(2000), 366);
//! let doy = day_of_year_from_label(1961, "1961-03-01").unwrap();
//! assert_eq!(doy.get(), 60);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and leap-year rules |
//! | `label` | Band date-label parsing |
//! | `sequence` | Day sequences for a full year |
//! | `error` | Error types |

mod doy;
mod error;
mod label;
mod sequence;

pub use doy::{DayOfYear, MAX_DAY_OF_YEAR, days_in_year, is_leap_year};
pub use error::CalendarError;
pub use label::{day_of_year_from_label, format_band_label, parse_band_label};
pub use sequence::{year_dates, year_days};
