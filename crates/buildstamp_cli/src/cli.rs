//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// buildstamp - Build target timestamp inspector
#[derive(Parser)]
#[command(name = "bstamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the modification time of targets
    Query {
        /// Target names (`path` or `archive(member)`)
        #[arg(required = true)]
        targets: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print cache statistics after the results
        #[arg(long)]
        stats: bool,

        /// Exit with status 1 if any target has no timestamp
        #[arg(long)]
        fail_on_unknown: bool,
    },

    /// List the members of a static archive
    Members {
        /// Archive path
        archive: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Initialize configuration
    Init {
        /// Directory to write the config into (defaults to the current one)
        dir: Option<PathBuf>,

        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
