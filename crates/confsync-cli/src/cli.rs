//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// confsync - Inspect and merge banner-delimited configuration files
#[derive(Parser, Debug)]
#[command(name = "confsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the blocks of a configuration file
    Blocks {
        /// Configuration file to inspect
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Merge a newly generated document into a configuration file
    ///
    /// Blocks present in both are replaced by the new version, blocks only
    /// in FILE are kept, blocks only in NEW are appended.
    ///
    /// Examples:
    ///   confsync merge app.yaml generated.yaml
    ///   confsync merge app.yaml generated.yaml --dry-run
    Merge {
        /// Configuration file to update
        file: PathBuf,

        /// Newly generated document
        new: PathBuf,

        /// Print a unified diff instead of writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Print one section of a configuration file as JSON
    Show {
        /// Configuration file to read
        file: PathBuf,

        /// Section name (case-insensitive)
        section: String,
    },
}
