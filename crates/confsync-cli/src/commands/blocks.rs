//! Blocks command implementation
//!
//! Lists the banner-delimited blocks of a configuration file.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use confsync_blocks::{Block, extract_blocks};
use confsync_fs::{NormalizedPath, io};

use crate::error::Result;

/// One listed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub key: String,
    pub name: String,
    pub line: usize,
    pub lines: usize,
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        Self {
            key: block.key(),
            name: block.display_name().to_string(),
            line: block.start_line,
            lines: block.body.lines().count(),
        }
    }
}

/// Summaries of every block in `text`, in document order.
pub fn summarize(text: &str) -> Vec<BlockSummary> {
    extract_blocks(text).iter().map(BlockSummary::from).collect()
}

/// Run the blocks command
pub fn run_blocks(file: &Path, json: bool) -> Result<()> {
    let path = NormalizedPath::new(file);
    let text = io::read_text(&path)?;
    let summaries = summarize(&text);
    tracing::debug!(path = %path, blocks = summaries.len(), "Listed blocks");

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("{} No blocks in {}", "!".yellow(), path.as_str().yellow());
        return Ok(());
    }

    println!("{} {}", "Blocks".blue().bold(), path.as_str().yellow());
    println!();
    for summary in &summaries {
        println!(
            "  {:>4}  {}  {}",
            summary.line,
            summary.key.cyan(),
            format!("({} lines)", summary.lines).dimmed()
        );
    }
    Ok(())
}
