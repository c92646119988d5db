//! Text rendering of [`Node`] trees.
//!
//! The output is a YAML-compatible subset: two-space indentation, `# `
//! comments above described fields, double-quoted strings, `[]` for empty
//! sequences and `null` for absent values.

use crate::node::{Node, Record};
use std::collections::HashSet;

/// One indentation level.
pub const INDENT: &str = "  ";

/// Rendering of an empty sequence.
pub const EMPTY_SEQ: &str = "[]";

/// Rendering of an empty record or map used as a sequence element.
pub const EMPTY_MAP: &str = "{}";

/// Rendering of an absent value.
pub const NULL: &str = "null";

/// Renders `node` at the given depth.
///
/// Record fields whose name is in `excluded` are skipped at every depth.
pub fn render(node: &Node, depth: usize, excluded: &HashSet<String>) -> String {
    match node {
        Node::Record(record) => render_record(record, depth, excluded),
        Node::Map(entries) => render_map(entries, depth, excluded),
        Node::Seq(items) => render_seq(items, depth, excluded),
        Node::Null => NULL.to_string(),
        Node::Text(text) => quote(text),
        Node::Scalar(text) => text.clone(),
    }
}

/// Renders `<indent><key>: <value>`, moving container values onto their own
/// indented lines.
pub fn render_entry(key: &str, value: &Node, depth: usize, excluded: &HashSet<String>) -> String {
    let rendered = render(value, depth + 1, excluded);
    let mut out = format!("{}{key}: ", INDENT.repeat(depth));
    if opens_block(value, &rendered) {
        out.push('\n');
        out.push_str(&rendered);
    } else if value.is_container() && rendered.is_empty() {
        // A bare `Key: ` would read back as null.
        out.push_str(EMPTY_MAP);
    } else {
        out.push_str(&rendered);
    }
    out
}

/// Whether a rendered value goes on the lines below its key.
pub fn opens_block(value: &Node, rendered: &str) -> bool {
    value.is_container() && !rendered.is_empty() && rendered != EMPTY_SEQ
}

/// Words a plain YAML scalar would resolve to something other than a string.
const RESERVED_WORDS: [&str; 9] = ["null", "true", "false", "yes", "no", "on", "off", "y", "n"];

/// Text of a map key. String keys are quoted unless they read back as the
/// same plain string; other scalars are written bare.
pub fn map_key(key: &Node) -> String {
    match key {
        Node::Text(text) if is_plain(text) => text.clone(),
        Node::Text(text) => quote(text),
        Node::Scalar(text) => text.clone(),
        Node::Null => NULL.to_string(),
        other => quote(&render(other, 0, &HashSet::new())),
    }
}

fn is_plain(text: &str) -> bool {
    text.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'))
        && !RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text))
        && text.parse::<f64>().is_err()
}

/// Double-quotes `text`, escaping backslashes, quotes and control characters.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_record(record: &Record, depth: usize, excluded: &HashSet<String>) -> String {
    let indent = INDENT.repeat(depth);
    record
        .fields()
        .iter()
        .filter(|field| field.is_exported() && !excluded.contains(field.name))
        .map(|field| {
            let mut out = String::new();
            if let Some(description) = field.description {
                for line in description.lines() {
                    out.push_str(&format!("{indent}# {line}\n"));
                }
            }
            out.push_str(&render_entry(field.name, &field.value, depth, excluded));
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_map(entries: &[(Node, Node)], depth: usize, excluded: &HashSet<String>) -> String {
    entries
        .iter()
        .map(|(key, value)| render_entry(&map_key(key), value, depth, excluded))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_seq(items: &[Node], depth: usize, excluded: &HashSet<String>) -> String {
    if items.is_empty() {
        return EMPTY_SEQ.to_string();
    }

    let indent = INDENT.repeat(depth);
    items
        .iter()
        .map(|item| {
            let rendered = render(item, depth + 1, excluded);
            // Container elements start on the dash line.
            let element = match (item.is_container(), rendered.is_empty()) {
                (true, true) => EMPTY_MAP,
                (true, false) => rendered.trim_start(),
                (false, _) => rendered.as_str(),
            };
            format!("{indent}- {element}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Structured;

    fn none() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn scalar_renders_bare() {
        assert_eq!(render(&8080u16.to_node(), 3, &none()), "8080");
        assert_eq!(render(&true.to_node(), 0, &none()), "true");
    }

    #[test]
    fn text_is_quoted_and_escaped() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(quote("C:\\tmp"), "\"C:\\\\tmp\"");
    }

    #[test]
    fn empty_seq_is_literal_at_any_depth() {
        let empty: Vec<u8> = Vec::new();
        for depth in 0..4 {
            assert_eq!(render(&empty.to_node(), depth, &none()), "[]");
        }
    }

    #[test]
    fn null_renders_literal() {
        let missing: Option<String> = None;
        assert_eq!(render(&missing.to_node(), 1, &none()), "null");
    }

    #[test]
    fn entry_with_empty_seq_stays_inline() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(render_entry("Peers", &empty.to_node(), 1, &none()), "  Peers: []");
    }

    #[test]
    fn entry_with_empty_record_is_flow_map() {
        let node: Node = Record::new().into();
        assert_eq!(render_entry("Tls", &node, 1, &none()), "  Tls: {}");
    }

    #[test]
    fn keys_needing_quotes() {
        assert_eq!(map_key(&Node::text("plain_key")), "plain_key");
        assert_eq!(map_key(&Node::text("a: b")), "\"a: b\"");
        assert_eq!(map_key(&Node::text("#x")), "\"#x\"");
        assert_eq!(map_key(&Node::text("Null")), "\"Null\"");
        assert_eq!(map_key(&Node::text("8080")), "\"8080\"");
        assert_eq!(map_key(&Node::text("inf")), "\"inf\"");
        assert_eq!(map_key(&Node::text("")), "\"\"");
        assert_eq!(map_key(&8080u16.to_node()), "8080");
    }

    #[test]
    fn entry_with_seq_opens_block() {
        assert_eq!(
            render_entry("Peers", &vec![1u8, 2].to_node(), 0, &none()),
            "Peers: \n  - 1\n  - 2"
        );
    }
}
