//! Writing annual index grids to NetCDF.

use std::path::{Path, PathBuf};

use climdex_grid::IndexGrid;
use ndarray::Array2;
use tracing::info;

use crate::error::IoError;
use crate::metadata::GridMetadata;
use crate::netcdf_read;

/// Attribute holding the `{INDEX}_{year}` label of a written grid.
pub const BAND_LABEL_ATTR: &str = "band_label";

/// Output path of `grid` inside `dir`, named after its band label.
pub fn output_path(dir: &Path, grid: &IndexGrid) -> PathBuf {
    dir.join(format!("{}.nc", grid.label()))
}

/// Write one annual index grid to a new NetCDF file.
///
/// The file holds `lat` and `lon` coordinate variables and a single 2-D
/// variable named after the index, carrying the `band_label` and `year`
/// attributes. Missing pixels are written as NaN, which is also the
/// declared `_FillValue`. Without `metadata` the coordinates are plain row
/// and column numbers.
///
/// # Errors
///
/// - [`IoError::DimensionMismatch`] if `metadata` does not fit the grid.
/// - [`IoError::Netcdf`] if the file cannot be created or written.
pub fn write_index_grid(
    path: &Path,
    grid: &IndexGrid,
    metadata: Option<&GridMetadata>,
) -> Result<(), IoError> {
    let (rows, cols) = grid.shape();
    let fallback;
    let metadata = match metadata {
        Some(meta) => {
            meta.check_shape((rows, cols))?;
            meta
        }
        None => {
            fallback = GridMetadata::indices(rows, cols);
            &fallback
        }
    };

    let mut file = netcdf::create(path)?;
    file.add_dimension("lat", rows)?;
    file.add_dimension("lon", cols)?;

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(metadata.lats(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(metadata.lons(), ..)?;
    }
    {
        let data: Vec<f64> = grid.values().iter().copied().collect();
        let mut var = file.add_variable::<f64>(grid.name(), &["lat", "lon"])?;
        var.put_attribute("_FillValue", f64::NAN)?;
        var.put_attribute(BAND_LABEL_ATTR, grid.label().as_str())?;
        var.put_attribute("year", grid.year())?;
        var.put_values(&data, ..)?;
    }

    info!(
        path = %path.display(),
        label = %grid.label(),
        n_missing = grid.n_missing(),
        "wrote index grid"
    );
    Ok(())
}

/// Read back a grid written by [`write_index_grid`].
///
/// The year is taken from the `band_label` attribute of `name`.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::MissingVariable`] if `name` is absent.
/// - [`IoError::Validation`] if the band label is absent or malformed.
pub fn read_index_grid(path: &Path, name: &str) -> Result<IndexGrid, IoError> {
    let file = netcdf_read::open_file(path)?;
    let values: Array2<f64> = netcdf_read::read_2d_f64(&file, name, path)?;

    let var = file
        .variable(name)
        .ok_or_else(|| IoError::MissingVariable {
            name: name.to_string(),
            path: path.to_path_buf(),
        })?;
    let label = netcdf_read::string_attribute(&var, BAND_LABEL_ATTR).ok_or_else(|| {
        IoError::Validation {
            count: 1,
            details: format!("variable '{name}' has no {BAND_LABEL_ATTR} attribute"),
        }
    })?;
    let year = label
        .rsplit_once('_')
        .and_then(|(_, y)| y.parse::<i32>().ok())
        .ok_or_else(|| IoError::Validation {
            count: 1,
            details: format!("malformed band label '{label}'"),
        })?;

    Ok(IndexGrid::new(name, year, values))
}
