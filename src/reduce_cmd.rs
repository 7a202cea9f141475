//! Reduce command: simple per-year indices such as FD, TXx and RX5day.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use climdex_grid::{DailyGrid, DoyThresholds, IndexGrid, PixelThresholds, YearSource};
use climdex_indices::{IndexConfig, SimpleIndex, ThresholdKey, Variable, YearInputs};
use climdex_io::{NetcdfYearSource, read_doy_thresholds, read_pixel_thresholds};

use crate::cli::RunArgs;
use crate::config::{ClimdexConfig, ReduceToml};
use crate::convert;
use crate::pipeline;

// ---------------------------------------------------------------------------
// ThresholdSet
// ---------------------------------------------------------------------------

/// Threshold grids loaded for a reduce run.
#[derive(Debug, Default)]
pub struct ThresholdSet {
    per_day: BTreeMap<ThresholdKey, DoyThresholds>,
    prwn95: Option<PixelThresholds>,
}

impl ThresholdSet {
    /// Add a calendar-day table.
    pub fn with_per_day(mut self, key: ThresholdKey, table: DoyThresholds) -> Self {
        self.per_day.insert(key, table);
        self
    }

    /// Set the very-wet-day threshold.
    pub fn with_prwn95(mut self, thresholds: PixelThresholds) -> Self {
        self.prwn95 = Some(thresholds);
        self
    }

    /// Read every threshold the indices need from the configured files.
    fn load(reduce: &ReduceToml, needed: &BTreeSet<ThresholdKey>) -> Result<Self> {
        let mut files = BTreeMap::new();
        for (name, file) in &reduce.thresholds {
            files.insert(convert::parse_threshold_key(name)?, file);
        }

        let mut set = Self::default();
        for &key in needed {
            let Some(file) = files.get(&key) else {
                bail!(
                    "threshold {} is required but not configured under [reduce.thresholds]",
                    key.name()
                );
            };
            info!(threshold = key.name(), path = %file.file.display(), "reading thresholds");
            let context = || format!("failed to read thresholds: {}", file.file.display());
            set = if key.is_per_day() {
                let table = read_doy_thresholds(&file.file, &file.var).with_context(context)?;
                set.with_per_day(key, table)
            } else {
                let prwn95 = read_pixel_thresholds(&file.file, &file.var).with_context(context)?;
                set.with_prwn95(prwn95)
            };
        }
        Ok(set)
    }

    /// Attach these thresholds to a year's inputs.
    fn attach<'a>(&'a self, mut inputs: YearInputs<'a>) -> YearInputs<'a> {
        for (&key, table) in &self.per_day {
            inputs = inputs.with_doy_thresholds(key, table);
        }
        if let Some(prwn95) = &self.prwn95 {
            inputs = inputs.with_prwn95(prwn95);
        }
        inputs
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the reduce pipeline from command-line arguments.
pub fn run(args: RunArgs) -> Result<()> {
    let config = ClimdexConfig::load(&args.config)?.with_overrides(&args);
    execute(&config)
}

/// Compute every index listed under `[reduce]`.
pub fn execute(config: &ClimdexConfig) -> Result<()> {
    let _cmd = info_span!("reduce").entered();
    let indices = convert::parse_simple_indices(&config.reduce.indices)?;
    if indices.is_empty() {
        warn!("no indices configured under [reduce]");
        return Ok(());
    }

    let years = convert::build_year_range(&config.years)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let index_cfg = convert::build_index_config(&config.reduce)?;
    pipeline::prepare_output_dir(&config.io.output_dir)?;

    let variables: BTreeSet<Variable> = indices
        .iter()
        .flat_map(|i| i.variables().iter().copied())
        .collect();
    let needed: BTreeSet<ThresholdKey> = indices.iter().filter_map(|i| i.threshold()).collect();
    let thresholds = ThresholdSet::load(&config.reduce, &needed)?;

    let mut sources = BTreeMap::new();
    for &var in &variables {
        let name = convert::variable_name(&config.reduce, var);
        sources.insert(var, NetcdfYearSource::new(reader_cfg.clone(), name)?);
    }
    let metadata = sources
        .values()
        .find_map(|s| pipeline::find_metadata(s, years.clone()));

    let written = reduce_years(&sources, &thresholds, &indices, years, &index_cfg, |grid| {
        pipeline::write_grid(&config.io.output_dir, &grid, metadata.as_ref())
    })?;
    info!(n_indices = indices.len(), written, "reduce complete");
    Ok(())
}

/// Compute `indices` for every year, passing each grid to `on_index`.
///
/// An index is skipped for a year when one of its input variables is
/// missing that year. Returns the number of grids produced.
pub fn reduce_years<S, F>(
    sources: &BTreeMap<Variable, S>,
    thresholds: &ThresholdSet,
    indices: &[SimpleIndex],
    years: RangeInclusive<i32>,
    config: &IndexConfig,
    mut on_index: F,
) -> Result<usize>
where
    S: YearSource,
    F: FnMut(IndexGrid) -> Result<()>,
{
    let mut written = 0;
    for year in years {
        let mut grids: BTreeMap<Variable, DailyGrid> = BTreeMap::new();
        for (&var, source) in sources {
            match pipeline::load_optional(source, year)? {
                Some(grid) => {
                    grids.insert(var, grid);
                }
                None => warn!(year, var = var.name(), "input missing"),
            }
        }

        let mut inputs = thresholds.attach(YearInputs::new());
        for (&var, grid) in &grids {
            inputs = inputs.with_daily(var, grid);
        }

        for &index in indices {
            if index.variables().iter().any(|v| !grids.contains_key(v)) {
                debug!(year, index = index.name(), "inputs missing, index skipped");
                continue;
            }
            let grid = index
                .compute(&inputs, config)
                .with_context(|| format!("{index} failed for {year}"))?;
            on_index(grid)?;
            written += 1;
        }
        info!(year, n_variables = grids.len(), "reduce year computed");
    }
    Ok(written)
}
