//! Merge command implementation
//!
//! Reconciles a newly generated document into an existing configuration file.

use std::path::Path;

use colored::Colorize;

use confsync_blocks::{BlockAction, Reconciliation, reconcile};
use confsync_core::ConfigFile;
use confsync_fs::{NormalizedPath, io};

use crate::error::Result;

/// Run the merge command
pub fn run_merge(file: &Path, new: &Path, dry_run: bool) -> Result<()> {
    let new_document = io::read_text(&NormalizedPath::new(new))?;
    let config = ConfigFile::open(file);

    if dry_run {
        let old = config.read()?.unwrap_or_default();
        let merged = reconcile(&old, &new_document);
        if !merged.changed {
            println!("{} {} is up to date.", "OK".green().bold(), config.path());
            return Ok(());
        }
        print_diff(&merged.diff(&old));
        return Ok(());
    }

    let outcome = config.reconcile(&new_document)?;
    if !outcome.written {
        println!("{} {} is up to date.", "OK".green().bold(), config.path());
        return Ok(());
    }

    println!("{} {}", "Updated".green().bold(), config.path().as_str().yellow());
    print_actions(&outcome.reconciliation);
    Ok(())
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}

fn print_actions(merged: &Reconciliation) {
    for (block, action) in merged.blocks.iter().zip(&merged.actions) {
        let marker = match action {
            BlockAction::Kept => "=".normal(),
            BlockAction::Replaced => "~".yellow(),
            BlockAction::Appended | BlockAction::Prioritized => "+".green(),
        };
        println!("  {} {} ({})", marker, block.key(), action_label(*action));
    }
}

fn action_label(action: BlockAction) -> &'static str {
    match action {
        BlockAction::Kept => "kept",
        BlockAction::Replaced => "replaced",
        BlockAction::Appended => "added",
        BlockAction::Prioritized => "added near top",
    }
}
