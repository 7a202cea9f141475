//! Spatial axes of a regular lon/lat grid.

use crate::error::IoError;

/// Longitude and latitude axes of a grid.
///
/// Row `r` of every grid lies at `lats[r]` and column `c` at `lons[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMetadata {
    lons: Vec<f64>,
    lats: Vec<f64>,
}

impl GridMetadata {
    /// Create metadata from the two coordinate axes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if either axis is empty.
    pub fn new(lons: Vec<f64>, lats: Vec<f64>) -> Result<Self, IoError> {
        let mut problems = Vec::new();
        if lons.is_empty() {
            problems.push("longitude axis is empty".to_string());
        }
        if lats.is_empty() {
            problems.push("latitude axis is empty".to_string());
        }
        if !problems.is_empty() {
            return Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            });
        }
        Ok(Self { lons, lats })
    }

    /// Axes holding plain row and column numbers, for grids without
    /// geographic coordinates.
    pub fn indices(rows: usize, cols: usize) -> Self {
        Self {
            lons: (0..cols).map(|c| c as f64).collect(),
            lats: (0..rows).map(|r| r as f64).collect(),
        }
    }

    /// Longitude of every column.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitude of every row.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// `(rows, cols)` described by these axes.
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }

    /// Check that a grid of `shape` fits these axes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] naming the first axis that
    /// differs.
    pub fn check_shape(&self, shape: (usize, usize)) -> Result<(), IoError> {
        let (rows, cols) = self.shape();
        if shape.0 != rows {
            return Err(IoError::DimensionMismatch {
                name: "lat".into(),
                expected: rows,
                got: shape.0,
            });
        }
        if shape.1 != cols {
            return Err(IoError::DimensionMismatch {
                name: "lon".into(),
                expected: cols,
                got: shape.1,
            });
        }
        Ok(())
    }
}
