//! buildstamp CLI
//!
//! Inspect build target timestamps, including static archive members.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use buildstamp_core::StampConfig;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_problems) => {
            if has_problems {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Query {
            targets,
            format,
            stats,
            fail_on_unknown,
        } => {
            let config = load_config(cli)?;
            commands::query::run_query(config, targets, *format, *stats, *fail_on_unknown)
        }
        Commands::Members { archive, format } => {
            let config = load_config(cli)?;
            commands::members::run_members(&config, archive, *format)
        }
        Commands::Init { dir, force } => {
            commands::init::run_init(dir.as_deref(), *force).map(|_| false)
        }
    }
}

fn load_config(cli: &Cli) -> Result<StampConfig> {
    if let Some(ref path) = cli.config {
        return StampConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = StampConfig::discover(".") {
        info!("Using config: {}", path.display());
        return StampConfig::from_file(&path).into_diagnostic();
    }

    Ok(StampConfig::new())
}
