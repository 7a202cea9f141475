//! Per-year NetCDF files as a [`YearSource`].

use std::path::{Path, PathBuf};

use chrono::Datelike;
use climdex_calendar::DayOfYear;
use climdex_grid::{DailyGrid, GridError, YearSource};
use tracing::debug;

use crate::error::IoError;
use crate::metadata::GridMetadata;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for locating and decoding yearly NetCDF files.
///
/// Files are found by substituting `{var}` and `{year}` in the file pattern,
/// relative to the input directory. The [`Default`] implementation reads
/// `{var}_{year}.nc` from the working directory with a CF `time` axis.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Directory holding the yearly files.
    dir: PathBuf,
    /// File name pattern with `{var}` and `{year}` placeholders.
    file_pattern: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Value treated as no-data in addition to NaN and `_FillValue`.
    no_data: Option<f64>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_pattern: "{var}_{year}.nc".into(),
            time_var: "time".into(),
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            no_data: None,
        }
    }
}

impl ReaderConfig {
    /// Set the input directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Set the file name pattern.
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Replace the longitude aliases.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Replace the latitude aliases.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Treat `marker` as no-data, or `None` to rely on NaN and `_FillValue`.
    pub fn with_no_data(mut self, marker: Option<f64>) -> Self {
        self.no_data = marker;
        self
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if !self.file_pattern.contains("{year}") {
            problems.push(format!(
                "file_pattern '{}' has no {{year}} placeholder",
                self.file_pattern
            ));
        }
        if self.time_var.is_empty() {
            problems.push("time_var must not be empty".to_string());
        }
        if self.lon_aliases.is_empty() {
            problems.push("lon_aliases must not be empty".to_string());
        }
        if self.lat_aliases.is_empty() {
            problems.push("lat_aliases must not be empty".to_string());
        }
        if !problems.is_empty() {
            return Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            });
        }
        Ok(())
    }

    // --- Accessors ---

    /// Input directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name pattern.
    pub fn file_pattern(&self) -> &str {
        &self.file_pattern
    }

    /// Time variable name.
    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Additional no-data marker.
    pub fn no_data(&self) -> Option<f64> {
        self.no_data
    }
}

// ---------------------------------------------------------------------------
// NetcdfYearSource
// ---------------------------------------------------------------------------

/// Reads one variable from one NetCDF file per calendar year.
///
/// Each file holds a 3-D variable `(time, y, x)` and a time axis in
/// `days since YYYY-MM-DD`. Every band is bound to the Gregorian
/// day-of-year of its date, so files may omit days.
#[derive(Debug, Clone)]
pub struct NetcdfYearSource {
    config: ReaderConfig,
    var: String,
}

impl NetcdfYearSource {
    /// Create a source reading `var` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the configuration is invalid.
    pub fn new(config: ReaderConfig, var: impl Into<String>) -> Result<Self, IoError> {
        config.validate()?;
        Ok(Self {
            config,
            var: var.into(),
        })
    }

    /// Variable read from every file.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Path of the file holding `year`.
    pub fn path_for(&self, year: i32) -> PathBuf {
        let name = self
            .config
            .file_pattern
            .replace("{var}", &self.var)
            .replace("{year}", &year.to_string());
        self.config.dir.join(name)
    }

    /// Read the lon/lat axes from the file holding `year`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if the file is absent, or any
    /// error raised while reading the coordinate variables.
    pub fn metadata(&self, year: i32) -> Result<GridMetadata, IoError> {
        let path = self.path_for(year);
        let file = netcdf_read::open_file(&path)?;
        let lons = netcdf_read::read_1d_f64(&file, &self.config.lon_aliases, &path)?;
        let lats = netcdf_read::read_1d_f64(&file, &self.config.lat_aliases, &path)?;
        GridMetadata::new(lons, lats)
    }

    /// Decode the file holding `year`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] if a band's date lies outside `year`,
    /// or any error raised while reading the file.
    pub fn read_year(&self, year: i32) -> Result<DailyGrid, IoError> {
        let path = self.path_for(year);
        let file = netcdf_read::open_file(&path)?;

        let values = netcdf_read::read_3d_f64(&file, &self.var, &path)?;
        let base = netcdf_read::read_time_units(&file, &self.config.time_var, &path)?;
        let offsets = netcdf_read::read_1d_f64(&file, &[self.config.time_var.as_str()], &path)?;
        if offsets.len() != values.dim().0 {
            return Err(IoError::DimensionMismatch {
                name: self.config.time_var.clone(),
                expected: values.dim().0,
                got: offsets.len(),
            });
        }

        let dates = netcdf_read::time_offsets_to_dates(base, &offsets)?;
        let days = dates
            .iter()
            .enumerate()
            .map(|(band, date)| {
                if date.year() != year {
                    return Err(IoError::InvalidTime {
                        reason: format!("band {band} is dated {date}, expected year {year}"),
                    });
                }
                Ok(DayOfYear::from_date(*date))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            year,
            var = %self.var,
            path = %path.display(),
            n_days = days.len(),
            "read daily grid"
        );

        let grid = DailyGrid::new(year, values, days)?;
        Ok(match self.config.no_data {
            Some(marker) => grid.with_no_data(marker),
            None => grid,
        })
    }
}

impl YearSource for NetcdfYearSource {
    fn load_year(&self, year: i32) -> Result<DailyGrid, GridError> {
        match self.read_year(year) {
            Ok(grid) => Ok(grid),
            Err(IoError::FileNotFound { .. }) => Err(GridError::MissingYear { year }),
            Err(e) => Err(GridError::Source {
                year,
                reason: e.to_string(),
            }),
        }
    }
}
