use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Annual climate-extreme indices from daily gridded data.
#[derive(Parser)]
#[command(
    name = "climdex",
    version,
    about = "Annual climate-extreme indices from daily gridded data"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute warm and cold spell duration indices (WSDI, CSDI).
    Spell(RunArgs),
    /// Compute consecutive dry and wet days (CDD, CWD).
    DryWet(RunArgs),
    /// Compute the per-year reductions listed under [reduce].
    Reduce(RunArgs),
    /// Run spell, dry-wet and reduce in turn.
    All(RunArgs),
}

/// Arguments shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "climdex.toml")]
    pub config: PathBuf,

    /// Override the first year from config.
    #[arg(long)]
    pub start: Option<i32>,

    /// Override the last year from config.
    #[arg(long)]
    pub end: Option<i32>,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
