//! Error types for the climdex-indices crate.

use climdex_grid::GridError;

/// Error type for all fallible operations in the climdex-indices crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// Returned when an index is requested without one of its inputs.
    #[error("index {index} requires input '{input}'")]
    MissingInput {
        /// Index name.
        index: String,
        /// Name of the absent input.
        input: String,
    },

    /// Returned when two inputs of one index cover different spatial grids.
    #[error("{what} shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Which input has the unexpected shape.
        what: String,
        /// Shape of the primary input.
        expected: (usize, usize),
        /// Shape of the offending input.
        got: (usize, usize),
    },

    /// Returned when paired daily grids describe different years or days.
    #[error("{what} covers different days: {reason}")]
    CalendarMismatch {
        /// Which input disagrees.
        what: String,
        /// Description of the difference.
        reason: String,
    },

    /// Returned when an index name is not recognised.
    #[error("unknown index: '{name}'")]
    UnknownIndex {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error originating from the climdex-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },
}

impl From<GridError> for IndexError {
    fn from(e: GridError) -> Self {
        IndexError::Grid {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_missing_input() {
        let e = IndexError::MissingInput {
            index: "DTR".to_string(),
            input: "tmin".to_string(),
        };
        assert_eq!(e.to_string(), "index DTR requires input 'tmin'");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = IndexError::ShapeMismatch {
            what: "tmin".to_string(),
            expected: (3, 4),
            got: (4, 3),
        };
        assert_eq!(
            e.to_string(),
            "tmin shape mismatch: expected (3, 4), got (4, 3)"
        );
    }

    #[test]
    fn error_calendar_mismatch() {
        let e = IndexError::CalendarMismatch {
            what: "tmin".to_string(),
            reason: "year 1962, expected 1961".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "tmin covers different days: year 1962, expected 1961"
        );
    }

    #[test]
    fn error_unknown_index() {
        let e = IndexError::UnknownIndex {
            name: "XYZ".to_string(),
        };
        assert_eq!(e.to_string(), "unknown index: 'XYZ'");
    }

    #[test]
    fn from_grid_error() {
        let e: IndexError = GridError::MissingYear { year: 1999 }.into();
        assert_eq!(e.to_string(), "grid error: no input grid for year 1999");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<IndexError>();
    }
}
