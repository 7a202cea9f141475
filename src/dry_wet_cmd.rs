//! Dry-wet command: CDD and CWD for every year.

use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use climdex_grid::{IndexGrid, YearSource};
use climdex_io::NetcdfYearSource;
use climdex_spell::{DryWetConfig, DryWetYear, SequenceSummary, dry_wet_spells};

use crate::cli::RunArgs;
use crate::config::ClimdexConfig;
use crate::convert;
use crate::pipeline;

/// Run the dry/wet pipeline from command-line arguments.
pub fn run(args: RunArgs) -> Result<()> {
    let config = ClimdexConfig::load(&args.config)?.with_overrides(&args);
    execute(&config)
}

/// Compute CDD and CWD for the configured precipitation variable.
pub fn execute(config: &ClimdexConfig) -> Result<()> {
    let _cmd = info_span!("dry_wet").entered();
    let years = convert::build_year_range(&config.years)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let dry_wet_cfg = convert::build_dry_wet_config(&config.dry_wet)?;
    pipeline::prepare_output_dir(&config.io.output_dir)?;

    let source = NetcdfYearSource::new(reader_cfg, &config.dry_wet.precip_var)?;
    let metadata = pipeline::find_metadata(&source, years.clone());

    let summary = for_each_dry_wet_year(&source, years, &dry_wet_cfg, |grid| {
        pipeline::write_grid(&config.io.output_dir, &grid, metadata.as_ref())
    })?;
    info!(
        computed = summary.computed.len(),
        skipped = summary.skipped.len(),
        "dry/wet spells complete"
    );
    Ok(())
}

/// Compute CDD and CWD independently for every year in `years`.
///
/// Each year stands alone; a missing year is skipped. Both grids of a year
/// are passed to `on_grid`, CDD first.
pub fn for_each_dry_wet_year<S, F>(
    source: &S,
    years: RangeInclusive<i32>,
    config: &DryWetConfig,
    mut on_grid: F,
) -> Result<SequenceSummary>
where
    S: YearSource + ?Sized,
    F: FnMut(IndexGrid) -> Result<()>,
{
    let mut summary = SequenceSummary::default();
    for year in years {
        let Some(grid) = pipeline::load_optional(source, year)? else {
            warn!(year, "precipitation missing, skipping year");
            summary.skipped.push(year);
            continue;
        };
        let DryWetYear { cdd, cwd } =
            dry_wet_spells(&grid, config).with_context(|| format!("CDD/CWD failed for {year}"))?;
        info!(year, cdd_missing = cdd.n_missing(), "dry/wet year computed");
        on_grid(cdd)?;
        on_grid(cwd)?;
        summary.computed.push(year);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use climdex_grid::{DailyGrid, InMemorySource};
    use ndarray::Array3;

    #[test]
    fn years_are_independent() {
        let wet_start = |year: i32, n_wet: usize| {
            let n = usize::from(climdex_calendar::days_in_year(year));
            let values =
                Array3::from_shape_fn((n, 1, 1), |(d, _, _)| if d < n_wet { 5.0 } else { 0.0 });
            DailyGrid::full_year(year, values).unwrap()
        };
        let source: InMemorySource = [wet_start(1990, 10), wet_start(1992, 3)]
            .into_iter()
            .collect();

        let mut out = Vec::new();
        let summary = for_each_dry_wet_year(&source, 1990..=1992, &DryWetConfig::new(), |g| {
            out.push((g.label(), g.get(0, 0)));
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.skipped, vec![1991]);
        assert_eq!(
            out,
            vec![
                ("CDD_1990".to_string(), Some(355.0)),
                ("CWD_1990".to_string(), Some(10.0)),
                ("CDD_1992".to_string(), Some(363.0)),
                ("CWD_1992".to_string(), Some(3.0)),
            ]
        );
    }
}
