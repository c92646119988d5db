//! Block extraction for banner-delimited documents.
//!
//! Splits a document into blocks with the layout:
//! ```text
//! ############################### Network Config ###############################
//! # optional description
//! Network:
//!   Port: 8080
//! ```
//! A block runs from its banner up to (not including) the next banner.

use crate::banner;

/// A block of a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The banner line, trimmed.
    pub header: String,
    /// The banner line and every following line of the block, each
    /// newline-terminated. Trailing blank lines are not part of the body.
    pub body: String,
    /// The 1-based line number of the banner.
    pub start_line: usize,
}

impl Block {
    /// Identity key used to match this block across document versions.
    pub fn key(&self) -> String {
        banner::identity_key(&self.header)
    }

    /// Display name as written in the banner.
    pub fn display_name(&self) -> &str {
        banner::display_name(&self.header).unwrap_or(&self.header)
    }

    /// Lines after the banner.
    pub fn content_lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines().skip(1)
    }

    fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    fn trim_trailing_blank_lines(&mut self) {
        while let Some(without_newline) = self.body.strip_suffix('\n') {
            let last_start = without_newline.rfind('\n').map_or(0, |i| i + 1);
            if last_start == 0 || !without_newline[last_start..].trim().is_empty() {
                break;
            }
            self.body.truncate(last_start);
        }
    }
}

/// Extracts all blocks from the given document, in order of appearance.
///
/// Lines before the first banner belong to no block. A document without
/// banners yields an empty vector.
///
/// # Example
/// ```
/// use confsync_blocks::banner::format_banner;
/// use confsync_blocks::parser::extract_blocks;
///
/// let document = format!("{}\nNetwork: \n  Port: 8080\n", format_banner("Network"));
/// let blocks = extract_blocks(&document);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].key(), "Network");
/// ```
pub fn extract_blocks(document: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for (idx, line) in document.lines().enumerate() {
        if banner::is_banner(line) {
            if let Some(previous) = blocks.last_mut() {
                previous.trim_trailing_blank_lines();
            }
            blocks.push(Block {
                header: line.trim().to_string(),
                body: String::new(),
                start_line: idx + 1,
            });
        }
        if let Some(current) = blocks.last_mut() {
            current.push_line(line);
        }
    }

    if let Some(last) = blocks.last_mut() {
        last.trim_trailing_blank_lines();
    }

    blocks
}

/// Text before the first banner (the whole document when it has none).
pub fn preamble(document: &str) -> String {
    let mut text = String::new();
    for line in document.lines().take_while(|line| !banner::is_banner(line)) {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Finds the first block whose identity key equals `key`.
pub fn find_block(document: &str, key: &str) -> Option<Block> {
    extract_blocks(document)
        .into_iter()
        .find(|block| block.key() == key)
}

/// Checks if a block with the given identity key exists.
pub fn has_block(document: &str, key: &str) -> bool {
    find_block(document, key).is_some()
}
