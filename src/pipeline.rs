//! Helpers shared by the subcommands.

use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, Result};
use climdex_grid::{DailyGrid, GridError, IndexGrid, YearSource};
use climdex_io::{GridMetadata, NetcdfYearSource, output_path, write_index_grid};
use tracing::debug;

/// Create the output directory if needed.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))
}

/// Coordinates of the first year in `years` whose file provides them.
pub fn find_metadata(
    source: &NetcdfYearSource,
    years: RangeInclusive<i32>,
) -> Option<GridMetadata> {
    years.into_iter().find_map(|year| match source.metadata(year) {
        Ok(meta) => Some(meta),
        Err(e) => {
            debug!(year, var = source.var(), error = %e, "no coordinates");
            None
        }
    })
}

/// Load a year, mapping [`GridError::MissingYear`] to `None`.
pub fn load_optional<S>(source: &S, year: i32) -> Result<Option<DailyGrid>>
where
    S: YearSource + ?Sized,
{
    match source.load_year(year) {
        Ok(grid) => Ok(Some(grid)),
        Err(GridError::MissingYear { .. }) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to load year {year}")),
    }
}

/// Write `grid` as `{INDEX}_{year}.nc` inside `dir`.
///
/// Coordinates are only attached when they match the grid's shape.
pub fn write_grid(dir: &Path, grid: &IndexGrid, metadata: Option<&GridMetadata>) -> Result<()> {
    let path = output_path(dir, grid);
    let metadata = metadata.filter(|m| m.shape() == grid.shape());
    write_index_grid(&path, grid, metadata)
        .with_context(|| format!("failed to write index grid: {}", path.display()))
}
