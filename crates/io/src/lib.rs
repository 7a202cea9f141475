//! # climdex-io
//!
//! Read yearly daily grids and threshold tables from NetCDF files and write
//! annual index grids back to NetCDF. Bridges external files into the
//! [`climdex_grid`] data model.
//!
//! [`NetcdfYearSource`] implements [`climdex_grid::YearSource`]: an absent
//! file surfaces as `GridError::MissingYear`, which the spell sequence
//! treats as a gap rather than a failure.

mod error;
mod metadata;
mod netcdf_read;
mod thresholds;
mod writer;
mod year_source;

pub use error::IoError;
pub use metadata::GridMetadata;
pub use thresholds::{read_doy_thresholds, read_pixel_thresholds};
pub use writer::{BAND_LABEL_ATTR, output_path, read_index_grid, write_index_grid};
pub use year_source::{NetcdfYearSource, ReaderConfig};
