//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDate;
use ndarray::{Array2, Array3};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Calendars whose day offsets map one-to-one onto Gregorian dates.
const GREGORIAN_CALENDARS: [&str; 3] = ["standard", "gregorian", "proleptic_gregorian"];

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64<S: AsRef<str>>(
    file: &netcdf::File,
    aliases: &[S],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for alias in aliases {
        if let Some(var) = file.variable(alias.as_ref()) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().map_or("unknown", AsRef::as_ref);
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Numeric `_FillValue` of a variable, if it declares one.
fn fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    match var.attribute_value("_FillValue")?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().copied().map(f64::from),
        _ => None,
    }
}

/// Read a variable of the given rank as `f64`, turning fill values into NaN.
///
/// Returns the flat data in storage order together with the dimension
/// lengths.
fn read_masked(
    file: &netcdf::File,
    var_name: &str,
    rank: usize,
    path: &Path,
) -> Result<(Vec<f64>, Vec<usize>), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if dims.len() != rank {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: rank,
            got: dims.len(),
        });
    }

    let mut data = var.get_values::<f64, _>(..)?;
    if let Some(fv) = fill_value(&var) {
        for v in data.iter_mut().filter(|v| **v == fv) {
            *v = f64::NAN;
        }
    }
    Ok((data, dims))
}

/// Read a 3-D variable laid out as `(time, y, x)`.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<Array3<f64>, IoError> {
    let (data, dims) = read_masked(file, var_name, 3, path)?;
    let expected = dims.iter().product();
    let got = data.len();
    Array3::from_shape_vec((dims[0], dims[1], dims[2]), data).map_err(|_| {
        IoError::DimensionMismatch {
            name: format!("{var_name} values"),
            expected,
            got,
        }
    })
}

/// Read a 2-D variable laid out as `(y, x)`.
pub(crate) fn read_2d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<Array2<f64>, IoError> {
    let (data, dims) = read_masked(file, var_name, 2, path)?;
    let expected = dims.iter().product();
    let got = data.len();
    Array2::from_shape_vec((dims[0], dims[1]), data).map_err(|_| IoError::DimensionMismatch {
        name: format!("{var_name} values"),
        expected,
        got,
    })
}

/// Number of dimensions of a variable.
pub(crate) fn rank(file: &netcdf::File, var_name: &str, path: &Path) -> Result<usize, IoError> {
    file.variable(var_name)
        .map(|v| v.dimensions().len())
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Read a string attribute of a variable, if present.
pub(crate) fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// Read the base date from the `units` attribute of a time variable.
///
/// Parses CF-convention strings like `"days since YYYY-MM-DD"` or
/// `"days since YYYY-MM-DD HH:MM:SS"`. A `calendar` attribute, when present,
/// must name a Gregorian calendar.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<NaiveDate, IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[0] != "days" || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }

    // Take only the date portion (first 10 characters of parts[2]).
    let date_str = parts[2].get(..10).unwrap_or(parts[2]);
    let base_date =
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse base date '{date_str}': {e}"),
        })?;

    if let Some(calendar) = string_attribute(&var, "calendar")
        && !GREGORIAN_CALENDARS.contains(&calendar.to_lowercase().as_str())
    {
        return Err(IoError::InvalidTime {
            reason: format!("unsupported calendar '{calendar}'"),
        });
    }

    Ok(base_date)
}

/// Convert floating-point day offsets from a base date into Gregorian dates.
///
/// Fractional offsets are truncated to whole days.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    offsets: &[f64],
) -> Result<Vec<NaiveDate>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            if !offset.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {offset}"),
                });
            }
            let days = offset as i64;
            base_date
                .checked_add_signed(chrono::TimeDelta::days(days))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {base_date}"),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn offsets_to_dates_basic() {
        let dates = time_offsets_to_dates(ymd(2000, 1, 1), &[0.0, 1.0, 59.0, 365.0])
            .expect("conversion succeeds");
        assert_eq!(
            dates,
            vec![ymd(2000, 1, 1), ymd(2000, 1, 2), ymd(2000, 2, 29), ymd(2000, 12, 31)]
        );
    }

    #[test]
    fn offsets_to_dates_fractional_truncated() {
        let dates = time_offsets_to_dates(ymd(2001, 6, 15), &[0.5, 1.9, 2.0])
            .expect("conversion succeeds");
        assert_eq!(dates, vec![ymd(2001, 6, 15), ymd(2001, 6, 16), ymd(2001, 6, 17)]);
    }

    #[test]
    fn offsets_to_dates_empty() {
        let dates = time_offsets_to_dates(ymd(2000, 1, 1), &[]).expect("conversion succeeds");
        assert!(dates.is_empty());
    }

    #[test]
    fn offsets_to_dates_nan_rejected() {
        let result = time_offsets_to_dates(ymd(2000, 1, 1), &[0.0, f64::NAN]);
        assert!(matches!(result, Err(IoError::InvalidTime { .. })));
    }
}
