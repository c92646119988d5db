//! confsync CLI
//!
//! Inspects, merges and decodes banner-delimited configuration files.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(command = ?cli.command, "Starting");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Blocks { file, json } => commands::run_blocks(&file, json),
        Commands::Merge { file, new, dry_run } => commands::run_merge(&file, &new, dry_run),
        Commands::Show { file, section } => commands::run_show(&file, &section),
    }
}
