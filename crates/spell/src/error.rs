//! Error types for the climdex-spell crate.

use climdex_grid::GridError;

/// Error type for all fallible operations in the climdex-spell crate.
///
/// Invalid daily values are never errors; they mark the affected pixel as
/// missing in the output instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpellError {
    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the requested year range is empty.
    #[error("invalid year range: start {start} is after end {end}")]
    InvalidYearRange {
        /// First requested year.
        start: i32,
        /// Last requested year.
        end: i32,
    },

    /// Returned when two spatial inputs of one computation disagree.
    #[error("{what} shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Which input has the unexpected shape.
        what: String,
        /// Shape of the daily grid being processed.
        expected: (usize, usize),
        /// Shape of the offending input.
        got: (usize, usize),
    },

    /// Wraps an error originating from the climdex-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },
}

impl From<GridError> for SpellError {
    fn from(e: GridError) -> Self {
        SpellError::Grid {
            reason: e.to_string(),
        }
    }
}
