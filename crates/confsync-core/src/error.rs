//! Error types for confsync-core

/// Result type for confsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while saving or loading a configuration document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] confsync_fs::Error),

    #[error("Failed to parse config document {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error(
        "Failed to load {} config section(s): {}",
        .failures.len(),
        section_names(.failures)
    )]
    Sections { failures: Vec<SectionError> },
}

impl Error {
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// A section that was present in the document but could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("Failed to load config section {section}: {source}")]
pub struct SectionError {
    pub section: String,
    #[source]
    pub source: DecodeError,
}

/// Why a section could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid YAML in block at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("content does not match the target record: {0}")]
    Transcode(#[from] serde_yaml::Error),
}

fn section_names(failures: &[SectionError]) -> String {
    failures
        .iter()
        .map(|f| f.section.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
