mod cli;
mod config;
mod convert;
mod dry_wet_cmd;
mod logging;
mod pipeline;
mod reduce_cmd;
mod spell_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::ClimdexConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Spell(args) => spell_cmd::run(args),
        Command::DryWet(args) => dry_wet_cmd::run(args),
        Command::Reduce(args) => reduce_cmd::run(args),
        Command::All(args) => {
            let config = ClimdexConfig::load(&args.config)?.with_overrides(&args);
            spell_cmd::execute(&config)?;
            dry_wet_cmd::execute(&config)?;
            reduce_cmd::execute(&config)
        }
    }
}
