use std::process::ExitCode;

use clap::Parser;

use vhsl_regions::cli::{Cli, Commands};
use vhsl_regions::commands::{lookup, merge, pipeline, propose, reconcile, survey, validate};
use vhsl_regions::common::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Survey => survey::run(&cli),
        Commands::Merge => merge::run(&cli),
        Commands::Reconcile => reconcile::run(&cli),
        Commands::Lookup => lookup::run(&cli),
        Commands::Validate(args) => validate::run(&cli, args),
        Commands::Propose => propose::run(&cli),
        Commands::Run => pipeline::run(&cli),
    };

    match result {
        Ok(verdict) if verdict.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
