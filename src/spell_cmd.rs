//! Spell command: WSDI and CSDI over the configured year range.

use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use climdex_grid::{IndexGrid, ThresholdProvider, YearSource};
use climdex_io::{GridMetadata, NetcdfYearSource, read_doy_thresholds};
use climdex_spell::{SequenceSummary, SpellConfig, run_spell_sequence};

use crate::cli::RunArgs;
use crate::config::ClimdexConfig;
use crate::convert;
use crate::pipeline;

/// Run the spell pipeline from command-line arguments.
pub fn run(args: RunArgs) -> Result<()> {
    let config = ClimdexConfig::load(&args.config)?.with_overrides(&args);
    execute(&config)
}

/// Compute every configured spell index.
pub fn execute(config: &ClimdexConfig) -> Result<()> {
    let _cmd = info_span!("spell").entered();
    if config.spell.indices.is_empty() {
        warn!("no spell indices configured under [spell]");
        return Ok(());
    }

    let years = convert::build_year_range(&config.years)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    pipeline::prepare_output_dir(&config.io.output_dir)?;

    for entry in &config.spell.indices {
        let kind = convert::parse_spell_kind(&entry.index)?;
        let spell_cfg = convert::build_spell_config(&config.spell, kind)?;
        let source = NetcdfYearSource::new(reader_cfg.clone(), &entry.var)?;

        info!(
            index = spell_cfg.index_name(),
            path = %entry.threshold_file.display(),
            "reading thresholds"
        );
        let thresholds = read_doy_thresholds(&entry.threshold_file, &entry.threshold_var)
            .with_context(|| {
                format!(
                    "failed to read thresholds: {}",
                    entry.threshold_file.display()
                )
            })?;
        let metadata = pipeline::find_metadata(&source, years.clone());

        let summary = write_spell_sequence(
            &source,
            years.clone(),
            &thresholds,
            &spell_cfg,
            &config.io.output_dir,
            metadata.as_ref(),
        )
        .with_context(|| format!("{} failed", spell_cfg.index_name()))?;

        info!(
            index = spell_cfg.index_name(),
            computed = summary.computed.len(),
            skipped = summary.skipped.len(),
            "spell index complete"
        );
    }
    Ok(())
}

/// Run the spell sequence and write every year's grid to `out_dir`.
pub fn write_spell_sequence<S, P>(
    source: &S,
    years: RangeInclusive<i32>,
    thresholds: &P,
    config: &SpellConfig,
    out_dir: &Path,
    metadata: Option<&GridMetadata>,
) -> Result<SequenceSummary>
where
    S: YearSource + ?Sized,
    P: ThresholdProvider + ?Sized,
{
    run_spell_sequence(source, years, thresholds, config, |grid: IndexGrid| -> Result<()> {
        pipeline::write_grid(out_dir, &grid, metadata)
    })
}
