//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{build, order, scan};
use crate::project::GlobalConfig;

#[derive(Parser)]
#[command(name = "bundle")]
#[command(author, version, about = "Manifest-driven bundling with dependency-ordered concatenation")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the project config file
    #[arg(long, short = 'c', global = true, default_value = "bundle.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve dependencies, concatenate and write the configured bundles
    Build,

    /// Print the dependency-ordered library file list without building
    Order,

    /// Print the dependency tokens declared by a single file
    Scan {
        /// File to scan for @requires directives
        file: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let global = GlobalConfig::load()?;
    let format = cli
        .format
        .unwrap_or_else(|| global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("bundle CLI starting");

    match cli.command {
        Commands::Build => {
            output.verbose_ctx("build", &format!("Using config: {}", cli.config.display()));
            build::run(&cli.config, &output)?
        }
        Commands::Order => {
            output.verbose_ctx("order", &format!("Using config: {}", cli.config.display()));
            order::run(&cli.config, &output)?
        }
        Commands::Scan { file } => {
            output.verbose_ctx("scan", &format!("Scanning: {}", file.display()));
            scan::run(&file, &output)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
