//! Error types for climdex-grid.

/// Error type for all fallible operations in the climdex-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned by a [`YearSource`](crate::YearSource) when a year's input is absent.
    #[error("no input grid for year {year}")]
    MissingYear {
        /// The requested calendar year.
        year: i32,
    },

    /// Returned by a [`YearSource`](crate::YearSource) when a year's input
    /// exists but cannot be read.
    #[error("cannot load year {year}: {reason}")]
    Source {
        /// The requested calendar year.
        year: i32,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when an array axis has an unexpected length.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the axis or quantity.
        name: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a grid has no days or no pixels.
    #[error("empty grid for year {year}")]
    EmptyGrid {
        /// Calendar year of the offending grid.
        year: i32,
    },

    /// Wraps an error originating from the climdex-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
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
}

impl From<climdex_calendar::CalendarError> for GridError {
    fn from(e: climdex_calendar::CalendarError) -> Self {
        GridError::Calendar {
            reason: e.to_string(),
        }
    }
}
