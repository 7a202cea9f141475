//! Error types for climdex-io.

use std::path::PathBuf;

use climdex_grid::GridError;

/// Error type for all fallible operations in the climdex-io crate.
///
/// This enum covers file-system failures, NetCDF library errors, time-axis
/// decoding problems and layout mismatches encountered when reading daily
/// grids or writing index grids.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the climdex-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the climdex-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<climdex_calendar::CalendarError> for IoError {
    fn from(e: climdex_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<GridError> for IoError {
    fn from(e: GridError) -> Self {
        IoError::Grid {
            reason: e.to_string(),
        }
    }
}
