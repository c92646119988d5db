//! Storage backends for configuration documents.
//!
//! The reconciliation and decode code never touches the filesystem directly;
//! it goes through [`Storage`], so tests can swap in [`MemoryStorage`] and
//! observe exactly which writes happened.

use crate::{Error, NormalizedPath, Result, io};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// How [`Storage::write_text`] treats existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the whole file.
    Overwrite,
    /// Add to the end of the file.
    Append,
}

/// Whole-file text storage.
pub trait Storage: Send + Sync {
    /// Read the whole file; `Ok(None)` when it does not exist.
    fn read_text(&self, path: &NormalizedPath) -> Result<Option<String>>;

    /// Write `text` to `path` according to `mode`.
    fn write_text(&self, path: &NormalizedPath, text: &str, mode: WriteMode) -> Result<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &NormalizedPath) -> bool;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_text(&self, path: &NormalizedPath) -> Result<Option<String>> {
        (**self).read_text(path)
    }

    fn write_text(&self, path: &NormalizedPath, text: &str, mode: WriteMode) -> Result<()> {
        (**self).write_text(path, text, mode)
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        (**self).exists(path)
    }
}

/// Local filesystem storage. Overwrites are atomic.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn read_text(&self, path: &NormalizedPath) -> Result<Option<String>> {
        io::read_text_if_exists(path)
    }

    fn write_text(&self, path: &NormalizedPath, text: &str, mode: WriteMode) -> Result<()> {
        match mode {
            WriteMode::Overwrite => io::write_text(path, text),
            WriteMode::Append => io::append_text(path, text),
        }
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        path.exists()
    }
}

/// In-memory storage that records every write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, WriteMode)>>,
    reject_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes all fail with [`Error::WriteRejected`].
    pub fn read_only() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Seed a file without counting it as a write.
    pub fn with_file(self, path: impl Into<NormalizedPath>, text: impl Into<String>) -> Self {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into().as_str().to_string(), text.into());
        self
    }

    /// Current content of a file.
    pub fn contents(&self, path: impl Into<NormalizedPath>) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.into().as_str())
            .cloned()
    }

    /// Number of writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Every write performed so far, in order.
    pub fn writes(&self) -> Vec<(String, WriteMode)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Storage for MemoryStorage {
    fn read_text(&self, path: &NormalizedPath) -> Result<Option<String>> {
        Ok(self
            .files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_str())
            .cloned())
    }

    fn write_text(&self, path: &NormalizedPath, text: &str, mode: WriteMode) -> Result<()> {
        if self.reject_writes {
            return Err(Error::WriteRejected {
                path: path.to_native(),
                message: "storage is read-only".to_string(),
            });
        }

        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        match mode {
            WriteMode::Overwrite => {
                files.insert(path.as_str().to_string(), text.to_string());
            }
            WriteMode::Append => {
                files
                    .entry(path.as_str().to_string())
                    .or_default()
                    .push_str(text);
            }
        }
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.as_str().to_string(), mode));
        Ok(())
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path.as_str())
    }
}
