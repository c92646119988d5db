//! Section registration and document generation.

use confsync_blocks::banner::format_banner;
use confsync_render::render::opens_block;
use confsync_render::{Node, Structured, render};
use std::collections::HashSet;

/// Section always written first when registered.
pub const BASE_SECTION: &str = "Base";

/// One registered section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    pub name: String,
    pub description: Option<String>,
    pub content: Node,
    pub excluded: HashSet<String>,
}

impl SectionEntry {
    /// Renders the section block, or `None` when its content is empty.
    ///
    /// ```text
    /// ############################### Network Config ###############################
    /// # Listener settings
    /// Network:
    ///   Port: 8080
    /// ```
    pub fn render(&self) -> Option<String> {
        let body = render(&self.content, 1, &self.excluded);
        if body.is_empty() {
            return None;
        }

        let mut out = format_banner(&self.name);
        out.push('\n');
        if let Some(description) = &self.description {
            for line in description.lines() {
                out.push_str(&format!("# {line}\n"));
            }
        }
        out.push_str(&self.name);
        out.push_str(": ");
        if opens_block(&self.content, &body) {
            out.push('\n');
        }
        out.push_str(&body);
        out.push('\n');
        Some(out)
    }
}

/// The sections an application wants written in one save cycle.
///
/// ```
/// use confsync_core::SaveContent;
/// use confsync_render::Record;
///
/// let mut content = SaveContent::new();
/// content
///     .add("Log", "Logging", &Record::new().field("Level", &3u8))
///     .add("Base", "", &Record::new().field("Name", "svc"));
///
/// let names: Vec<&str> = content.sections().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, vec!["Base", "Log"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SaveContent {
    sections: Vec<SectionEntry>,
}

impl SaveContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a section. An empty description writes no comment line.
    pub fn add<T: Structured + ?Sized>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        content: &T,
    ) -> &mut Self {
        self.add_with_exclude(name, description, content, std::iter::empty::<String>())
    }

    /// Registers a section whose listed field names are never written.
    ///
    /// Registering a name twice replaces the earlier entry in place.
    pub fn add_with_exclude<T, I>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        content: &T,
        excluded: I,
    ) -> &mut Self
    where
        T: Structured + ?Sized,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let description = description.into();
        let entry = SectionEntry {
            name: name.into(),
            description: (!description.is_empty()).then_some(description),
            content: content.to_node(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        };

        match self.sections.iter_mut().find(|s| s.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.sections.push(entry),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SectionEntry> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in write order: `Base` first, then registration order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionEntry> {
        let base = self.get(BASE_SECTION);
        base.into_iter()
            .chain(self.sections.iter().filter(|s| s.name != BASE_SECTION))
    }

    /// Generates the full document, one blank line between sections.
    pub fn to_document(&self) -> String {
        self.sections()
            .filter_map(|section| {
                let rendered = section.render();
                if rendered.is_none() {
                    tracing::debug!(section = %section.name, "Skipping empty config section");
                }
                rendered
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
