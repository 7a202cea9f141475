//! Pure conversion functions: TOML config structs -> crate API config types.

use std::ops::RangeInclusive;

use anyhow::{Result, bail};

use crate::config::*;

use climdex_indices::{IndexConfig, SimpleIndex, ThresholdKey, Variable};
use climdex_io::ReaderConfig;
use climdex_spell::{DryWetConfig, SpellConfig, SpellKind};

/// Parses a spell index name into the corresponding spell kind.
pub fn parse_spell_kind(s: &str) -> Result<SpellKind> {
    match s.to_lowercase().as_str() {
        "wsdi" | "warm" => Ok(SpellKind::Warm),
        "csdi" | "cold" => Ok(SpellKind::Cold),
        other => bail!("unknown spell index: {other:?}"),
    }
}

/// Parses a threshold name such as `TXin90` (case-insensitive).
pub fn parse_threshold_key(s: &str) -> Result<ThresholdKey> {
    match ThresholdKey::ALL
        .into_iter()
        .find(|k| k.name().eq_ignore_ascii_case(s))
    {
        Some(key) => Ok(key),
        None => bail!("unknown threshold: {s:?}"),
    }
}

/// Parses the list of simple index names, rejecting unknown or repeated ones.
pub fn parse_simple_indices(names: &[String]) -> Result<Vec<SimpleIndex>> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let index: SimpleIndex = name.parse()?;
        if out.contains(&index) {
            bail!("index {index} listed twice");
        }
        out.push(index);
    }
    Ok(out)
}

/// Validates the inclusive year range.
pub fn build_year_range(years: &YearsToml) -> Result<RangeInclusive<i32>> {
    if years.start > years.end {
        bail!(
            "years.start ({}) must not be after years.end ({})",
            years.start,
            years.end
        );
    }
    Ok(years.start..=years.end)
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    if let Some(v) = io.no_data
        && !v.is_finite()
    {
        bail!("io.no_data must be finite, got {v}");
    }
    let cfg = ReaderConfig::default()
        .with_dir(&io.input_dir)
        .with_file_pattern(&io.file_pattern)
        .with_time_var(&io.time_var)
        .with_lon_aliases(io.lon_aliases.clone())
        .with_lat_aliases(io.lat_aliases.clone())
        .with_no_data(io.no_data);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`SpellConfig`] for one spell index.
pub fn build_spell_config(spell: &SpellToml, kind: SpellKind) -> Result<SpellConfig> {
    let cfg = SpellConfig::new(kind).with_min_length(spell.min_length);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`DryWetConfig`] from the TOML dry/wet configuration.
pub fn build_dry_wet_config(dry_wet: &DryWetToml) -> Result<DryWetConfig> {
    let cfg = DryWetConfig::new().with_wet_day_threshold(dry_wet.wet_day_threshold);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`IndexConfig`] from the TOML reduce configuration.
pub fn build_index_config(reduce: &ReduceToml) -> Result<IndexConfig> {
    let cfg = IndexConfig::new()
        .with_wet_day_threshold(reduce.wet_day_threshold)
        .with_heavy_precip_threshold(reduce.heavy_precip_threshold)
        .with_max_window(reduce.max_window)
        .with_tfr_max(reduce.tfr_max)
        .with_freeze_min(reduce.freeze_min);
    cfg.validate()?;
    Ok(cfg)
}

/// File variable holding the daily values of `var`.
pub fn variable_name(reduce: &ReduceToml, var: Variable) -> &str {
    match var {
        Variable::Tmax => &reduce.tmax_var,
        Variable::Tmin => &reduce.tmin_var,
        Variable::Tmean => &reduce.tmean_var,
        Variable::Precip => &reduce.precip_var,
    }
}
