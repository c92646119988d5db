//! Section banners.
//!
//! A banner is a single line of the form
//! ```text
//! ############################### Network Config ###############################
//! ```
//! with equally long `#` runs on both sides. The text between the runs is the
//! display name; its identity key is what reconciliation matches on.

use regex::Regex;
use std::sync::LazyLock;

/// Character the marker runs are made of.
pub const MARKER: char = '#';

/// Shortest marker run accepted on either side of a banner.
pub const MIN_MARKER_RUN: usize = 31;

/// Trailing word every generated banner carries after the section name.
pub const CONFIG_SUFFIX: &str = "Config";

static BANNER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#+)[ \t]+(\S.*?)[ \t]+(#+)$").expect("Invalid banner regex")
});

/// Returns the display name if `line` is a well-formed banner.
///
/// Both marker runs must be at least [`MIN_MARKER_RUN`] long and of equal
/// length; anything else is ordinary content.
///
/// # Example
/// ```
/// use confsync_blocks::banner::{display_name, format_banner};
///
/// let line = format_banner("Network");
/// assert_eq!(display_name(&line), Some("Network Config"));
/// assert_eq!(display_name("# just a comment"), None);
/// ```
pub fn display_name(line: &str) -> Option<&str> {
    let caps = BANNER_REGEX.captures(line.trim())?;
    let leading = caps.get(1)?.as_str().len();
    let trailing = caps.get(3)?.as_str().len();
    if leading < MIN_MARKER_RUN || leading != trailing {
        return None;
    }
    caps.get(2).map(|m| m.as_str())
}

/// Whether `line` opens a new block.
pub fn is_banner(line: &str) -> bool {
    display_name(line).is_some()
}

/// Builds the banner line for a section.
pub fn format_banner(section: &str) -> String {
    let run = MARKER.to_string().repeat(MIN_MARKER_RUN);
    format!("{run} {section} {CONFIG_SUFFIX} {run}")
}

/// Derives the identity key of a block header.
///
/// Marker runs, parenthetical qualifiers and a trailing `Config` word
/// (any case) are removed and inner whitespace collapsed, so
/// `"### Network  config (edited) ###"` and `"### Network Config ###"` are the
/// same section.
pub fn identity_key(header: &str) -> String {
    let name = display_name(header).unwrap_or_else(|| header.trim());

    let mut unqualified = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => unqualified.push(c),
            _ => {}
        }
    }

    let mut words: Vec<&str> = unqualified.split_whitespace().collect();
    if words.len() > 1
        && words
            .last()
            .is_some_and(|w| w.eq_ignore_ascii_case(CONFIG_SUFFIX))
    {
        words.pop();
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_banner_is_recognized() {
        let line = format_banner("Base");
        assert!(is_banner(&line));
        assert_eq!(identity_key(&line), "Base");
    }

    #[test]
    fn unequal_marker_runs_are_not_banners() {
        let run = "#".repeat(MIN_MARKER_RUN);
        let line = format!("{run}# Base Config {run}");
        assert!(!is_banner(&line));
    }

    #[test]
    fn short_marker_runs_are_not_banners() {
        assert!(!is_banner("### Base Config ###"));
    }

    #[test]
    fn bare_marker_line_is_not_a_banner() {
        assert!(!is_banner(&"#".repeat(80)));
    }

    #[test]
    fn identity_key_ignores_qualifier_and_suffix_case() {
        let run = "#".repeat(MIN_MARKER_RUN);
        let edited = format!("{run} Network  config (edited by ops) {run}");
        assert_eq!(identity_key(&edited), "Network");
    }

    #[test]
    fn identity_key_keeps_lone_config_word() {
        let run = "#".repeat(MIN_MARKER_RUN);
        assert_eq!(identity_key(&format!("{run} Config {run}")), "Config");
    }
}
