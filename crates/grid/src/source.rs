//! Where yearly daily grids come from.

use std::collections::BTreeMap;

use tracing::debug;

use crate::daily::DailyGrid;
use crate::error::GridError;

/// Supplies one [`DailyGrid`] per calendar year.
///
/// A year with no input is reported as [`GridError::MissingYear`]; callers
/// treat that as "skip this year", every other error as fatal.
pub trait YearSource {
    /// Load the grid for `year`.
    ///
    /// # Errors
    ///
    /// [`GridError::MissingYear`] when the year has no input, any other
    /// [`GridError`] when the input exists but cannot be used.
    fn load_year(&self, year: i32) -> Result<DailyGrid, GridError>;
}

/// A [`YearSource`] backed by grids already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    grids: BTreeMap<i32, DailyGrid>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grid, replacing any previous grid for the same year.
    pub fn insert(&mut self, grid: DailyGrid) {
        self.grids.insert(grid.year(), grid);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_grid(mut self, grid: DailyGrid) -> Self {
        self.insert(grid);
        self
    }

    /// Years currently held, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.grids.keys().copied()
    }
}

impl FromIterator<DailyGrid> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = DailyGrid>>(iter: I) -> Self {
        let mut source = Self::new();
        for grid in iter {
            source.insert(grid);
        }
        source
    }
}

impl YearSource for InMemorySource {
    fn load_year(&self, year: i32) -> Result<DailyGrid, GridError> {
        debug!(year, "loading in-memory grid");
        self.grids
            .get(&year)
            .cloned()
            .ok_or(GridError::MissingYear { year })
    }
}
