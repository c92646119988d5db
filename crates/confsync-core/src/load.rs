//! Typed loading of configuration documents.
//!
//! Every block is parsed on its own so that one malformed block only fails
//! the section it belongs to. Top-level entries from all blocks (and the
//! preamble) are merged into one lookup table, first occurrence wins.
//!
//! A section is decoded onto the caller's current value: keys present in the
//! document overwrite (an explicit `null` clears), keys absent keep what the
//! record held. A section missing from the document, or `null` as a whole,
//! leaves its record untouched.

use crate::error::{DecodeError, Error, Result, SectionError};
use crate::options::ConfigFileOptions;
use confsync_blocks::{Block, extract_blocks, preamble};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value as YamlValue};

/// A destination a document section can be decoded onto.
///
/// Implemented for every type that round-trips through serde.
pub trait SectionTarget {
    /// Overlays `value` onto the current content.
    fn apply(&mut self, value: YamlValue) -> serde_yaml::Result<()>;
}

impl<T: Serialize + DeserializeOwned> SectionTarget for T {
    fn apply(&mut self, value: YamlValue) -> serde_yaml::Result<()> {
        let mut current = serde_yaml::to_value(&*self)?;
        overlay(&mut current, value);
        *self = serde_yaml::from_value(current)?;
        Ok(())
    }
}

/// Merges `incoming` into `current`. Mappings merge key by key, anything
/// else (`null` included) replaces the existing value.
pub fn overlay(current: &mut YamlValue, incoming: YamlValue) {
    match (current, incoming) {
        (YamlValue::Mapping(current), YamlValue::Mapping(incoming)) => {
            for (key, value) in incoming {
                match current.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (current, incoming) => *current = incoming,
    }
}

/// The sections a load call should fill, by name.
///
/// ```
/// use confsync_core::{Sections, load_document};
///
/// let mut port = 0u16;
/// let report = load_document("Port: 8080\n", Sections::new().with("Port", &mut port)).unwrap();
/// assert_eq!(port, 8080);
/// assert_eq!(report.loaded, vec!["Port".to_string()]);
/// ```
#[derive(Default)]
pub struct Sections<'a> {
    entries: Vec<(String, &'a mut dyn SectionTarget)>,
}

impl<'a> Sections<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, target: &'a mut dyn SectionTarget) -> Self {
        self.insert(name, target);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, target: &'a mut dyn SectionTarget) {
        self.entries.push((name.into(), target));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Sections<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// What a load call did with each requested section.
#[derive(Debug, Default)]
#[must_use = "sections that failed to decode are only reported here; call `into_result` to surface them"]
pub struct LoadReport {
    /// Sections decoded onto their record.
    pub loaded: Vec<String>,
    /// Sections the document does not mention; their record is untouched.
    pub absent: Vec<String>,
    /// Sections present in the document that could not be decoded.
    pub failures: Vec<SectionError>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turns a report with failures into [`Error::Sections`].
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::Sections {
                failures: self.failures,
            })
        }
    }
}

/// Decodes `document` into `sections` with default options.
pub fn load_document(document: &str, sections: Sections<'_>) -> Result<LoadReport> {
    decode(document, "<document>", sections, &ConfigFileOptions::default())
}

/// Decodes `document` into `sections`. `origin` names the document in errors.
pub fn decode(
    document: &str,
    origin: &str,
    sections: Sections<'_>,
    options: &ConfigFileOptions,
) -> Result<LoadReport> {
    let parsed = ParsedDocument::parse(document, origin)?;
    let mut report = LoadReport::default();

    for (name, target) in sections.entries {
        match parsed.lookup(&name, options.lenient_keys) {
            Some(value) if !value.is_null() => {
                match target.apply(value.clone()) {
                    Ok(()) => {
                        tracing::debug!(section = %name, "Loaded config section");
                        report.loaded.push(name);
                    }
                    Err(e) => {
                        tracing::warn!(section = %name, error = %e, "Config section does not match its record");
                        report.failures.push(SectionError {
                            section: name,
                            source: DecodeError::Transcode(e),
                        });
                    }
                }
            }
            Some(_) => {
                tracing::debug!(section = %name, "Config section is null, keeping current value");
                report.absent.push(name);
            }
            None => match parsed.broken_block(&name, options.lenient_keys) {
                Some(broken) => report.failures.push(SectionError {
                    section: name,
                    source: DecodeError::Syntax {
                        line: broken.line,
                        message: broken.message.clone(),
                    },
                }),
                None => {
                    tracing::debug!(section = %name, "Config section not in document");
                    report.absent.push(name);
                }
            },
        }
    }

    Ok(report)
}

struct BrokenBlock {
    key: String,
    line: usize,
    message: String,
}

#[derive(Default)]
struct ParsedDocument {
    entries: Mapping,
    broken: Vec<BrokenBlock>,
}

impl ParsedDocument {
    fn parse(document: &str, origin: &str) -> Result<Self> {
        let mut parsed = Self::default();
        if document.trim().is_empty() {
            return Ok(parsed);
        }

        let blocks = extract_blocks(document);
        if blocks.is_empty() {
            let value: YamlValue = serde_yaml::from_str(document)
                .map_err(|e| Error::parse(origin, e.to_string()))?;
            parsed.absorb(value);
            return Ok(parsed);
        }

        let head = preamble(document);
        if !head.trim().is_empty() {
            match serde_yaml::from_str::<YamlValue>(&head) {
                Ok(value) => parsed.absorb(value),
                Err(e) => tracing::warn!(origin, error = %e, "Ignoring unparsable preamble"),
            }
        }

        for block in &blocks {
            parsed.parse_block(block, origin);
        }
        Ok(parsed)
    }

    fn parse_block(&mut self, block: &Block, origin: &str) {
        match serde_yaml::from_str::<YamlValue>(&block.body) {
            Ok(value) => self.absorb(value),
            Err(e) => {
                let line = e
                    .location()
                    .map_or(block.start_line, |l| block.start_line + l.line().saturating_sub(1));
                tracing::warn!(
                    origin,
                    block = %block.display_name(),
                    line,
                    error = %e,
                    "Config block is not valid YAML"
                );
                self.broken.push(BrokenBlock {
                    key: block.key(),
                    line,
                    message: e.to_string(),
                });
            }
        }
    }

    fn absorb(&mut self, value: YamlValue) {
        let YamlValue::Mapping(mapping) = value else {
            return;
        };
        for (key, value) in mapping {
            if !self.entries.contains_key(&key) {
                self.entries.insert(key, value);
            }
        }
    }

    fn lookup(&self, name: &str, lenient: bool) -> Option<&YamlValue> {
        if let Some(value) = self.entries.get(name) {
            return Some(value);
        }
        if !lenient {
            return None;
        }
        self.entries
            .iter()
            .find(|(key, _)| key.as_str().is_some_and(|k| k.eq_ignore_ascii_case(name)))
            .map(|(_, value)| value)
    }

    fn broken_block(&self, name: &str, lenient: bool) -> Option<&BrokenBlock> {
        self.broken.iter().find(|b| {
            if lenient {
                b.key.eq_ignore_ascii_case(name)
            } else {
                b.key == name
            }
        })
    }
}
