use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::RunArgs;

/// Top-level climdex configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClimdexConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Year range.
    #[serde(default)]
    pub years: YearsToml,

    /// Spell duration settings.
    #[serde(default)]
    pub spell: SpellToml,

    /// Consecutive dry/wet day settings.
    #[serde(default)]
    pub dry_wet: DryWetToml,

    /// Simple per-year reductions.
    #[serde(default)]
    pub reduce: ReduceToml,
}

impl ClimdexConfig {
    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, args: &RunArgs) -> Self {
        if let Some(start) = args.start {
            self.years.start = start;
        }
        if let Some(end) = args.end {
            self.years.end = end;
        }
        if let Some(dir) = &args.output_dir {
            self.io.output_dir = dir.clone();
        }
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default = "default_lon_aliases")]
    pub lon_aliases: Vec<String>,
    #[serde(default = "default_lat_aliases")]
    pub lat_aliases: Vec<String>,
    #[serde(default)]
    pub no_data: Option<f64>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            file_pattern: default_file_pattern(),
            time_var: default_time_var(),
            lon_aliases: default_lon_aliases(),
            lat_aliases: default_lat_aliases(),
            no_data: None,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_file_pattern() -> String {
    "{var}_{year}.nc".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_lon_aliases() -> Vec<String> {
    vec!["lon".into(), "longitude".into(), "x".into()]
}
fn default_lat_aliases() -> Vec<String> {
    vec!["lat".into(), "latitude".into(), "y".into()]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearsToml {
    #[serde(default = "default_start")]
    pub start: i32,
    #[serde(default = "default_end")]
    pub end: i32,
}

impl Default for YearsToml {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

fn default_start() -> i32 {
    1961
}
fn default_end() -> i32 {
    2014
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpellToml {
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    #[serde(default)]
    pub indices: Vec<SpellIndexToml>,
}

impl Default for SpellToml {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            indices: Vec::new(),
        }
    }
}

fn default_min_length() -> u32 {
    climdex_spell::DEFAULT_MIN_LENGTH
}

/// One spell index with its daily input and calendar-day threshold.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpellIndexToml {
    /// `"wsdi"` or `"csdi"`.
    pub index: String,
    pub var: String,
    pub threshold_file: PathBuf,
    pub threshold_var: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DryWetToml {
    #[serde(default = "default_precip_var")]
    pub precip_var: String,
    #[serde(default = "default_wet_day_threshold")]
    pub wet_day_threshold: f64,
}

impl Default for DryWetToml {
    fn default() -> Self {
        Self {
            precip_var: default_precip_var(),
            wet_day_threshold: default_wet_day_threshold(),
        }
    }
}

fn default_precip_var() -> String {
    "pr".to_string()
}
fn default_wet_day_threshold() -> f64 {
    climdex_spell::DEFAULT_WET_DAY_THRESHOLD
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReduceToml {
    /// Index names such as `"FD"` or `"RX5day"`.
    #[serde(default)]
    pub indices: Vec<String>,
    #[serde(default = "default_tmax_var")]
    pub tmax_var: String,
    #[serde(default = "default_tmin_var")]
    pub tmin_var: String,
    #[serde(default = "default_tmean_var")]
    pub tmean_var: String,
    #[serde(default = "default_precip_var")]
    pub precip_var: String,
    #[serde(default = "default_wet_day_threshold")]
    pub wet_day_threshold: f64,
    #[serde(default = "default_heavy_precip_threshold")]
    pub heavy_precip_threshold: f64,
    #[serde(default = "default_max_window")]
    pub max_window: usize,
    #[serde(default = "default_tfr_max")]
    pub tfr_max: f64,
    #[serde(default = "default_freeze_min")]
    pub freeze_min: f64,
    /// Threshold grids keyed by name, e.g. `TXin90` or `PRwn95`.
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdFileToml>,
}

impl Default for ReduceToml {
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            tmax_var: default_tmax_var(),
            tmin_var: default_tmin_var(),
            tmean_var: default_tmean_var(),
            precip_var: default_precip_var(),
            wet_day_threshold: default_wet_day_threshold(),
            heavy_precip_threshold: default_heavy_precip_threshold(),
            max_window: default_max_window(),
            tfr_max: default_tfr_max(),
            freeze_min: default_freeze_min(),
            thresholds: BTreeMap::new(),
        }
    }
}

fn default_tmax_var() -> String {
    "tasmax".to_string()
}
fn default_tmin_var() -> String {
    "tasmin".to_string()
}
fn default_tmean_var() -> String {
    "tas".to_string()
}
fn default_heavy_precip_threshold() -> f64 {
    10.0
}
fn default_max_window() -> usize {
    5
}
fn default_tfr_max() -> f64 {
    1000.0
}
fn default_freeze_min() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdFileToml {
    pub file: PathBuf,
    pub var: String,
}
