//! Reading threshold grids from NetCDF.

use std::path::Path;

use climdex_calendar::MAX_DAY_OF_YEAR;
use climdex_grid::{DoyThresholds, PixelThresholds};
use ndarray::Axis;
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read;

/// Read a calendar-day threshold table such as TXin90.
///
/// `var` must be a 3-D variable laid out as `(day, y, x)` with 366 days,
/// day `d` holding the threshold of day-of-year `d + 1`.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::MissingVariable`] if `var` is absent.
/// - [`IoError::DimensionMismatch`] if the variable is not 3-D or its day
///   axis is not 366 long.
pub fn read_doy_thresholds(path: &Path, var: &str) -> Result<DoyThresholds, IoError> {
    let file = netcdf_read::open_file(path)?;
    let table = netcdf_read::read_3d_f64(&file, var, path)?;
    let n_days = table.dim().0;
    if n_days != usize::from(MAX_DAY_OF_YEAR) {
        return Err(IoError::DimensionMismatch {
            name: format!("{var} day"),
            expected: usize::from(MAX_DAY_OF_YEAR),
            got: n_days,
        });
    }
    debug!(path = %path.display(), var, shape = ?table.dim(), "read calendar-day thresholds");
    Ok(DoyThresholds::new(table)?)
}

/// Read a per-pixel threshold grid such as PRwn95.
///
/// `var` may be 2-D `(y, x)` or 3-D with a single leading band.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::MissingVariable`] if `var` is absent.
/// - [`IoError::DimensionMismatch`] if the variable has another rank or
///   more than one band.
pub fn read_pixel_thresholds(path: &Path, var: &str) -> Result<PixelThresholds, IoError> {
    let file = netcdf_read::open_file(path)?;
    let values = match netcdf_read::rank(&file, var, path)? {
        3 => {
            let banded = netcdf_read::read_3d_f64(&file, var, path)?;
            if banded.dim().0 != 1 {
                return Err(IoError::DimensionMismatch {
                    name: format!("{var} band"),
                    expected: 1,
                    got: banded.dim().0,
                });
            }
            banded.index_axis_move(Axis(0), 0)
        }
        _ => netcdf_read::read_2d_f64(&file, var, path)?,
    };
    debug!(path = %path.display(), var, shape = ?values.dim(), "read pixel thresholds");
    Ok(PixelThresholds::new(values))
}
