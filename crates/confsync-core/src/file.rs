//! The configuration file handle.

use crate::content::SaveContent;
use crate::load::{self, LoadReport, Sections};
use crate::options::ConfigFileOptions;
use crate::save::{self, SaveOutcome};
use crate::Result;
use confsync_blocks::{Reconciliation, reconcile};
use confsync_fs::{FsStorage, NormalizedPath, Storage, WriteMode};

/// A configuration document at a fixed path.
///
/// Relative paths stored inside the document are resolved against
/// [`base_dir`](Self::base_dir) instead of changing the process working
/// directory.
#[derive(Debug, Clone)]
pub struct ConfigFile<S: Storage = FsStorage> {
    path: NormalizedPath,
    storage: S,
    options: ConfigFileOptions,
}

impl ConfigFile<FsStorage> {
    /// A handle for a file on disk.
    pub fn open(path: impl Into<NormalizedPath>) -> Self {
        Self::with_storage(path, FsStorage::new())
    }
}

impl<S: Storage> ConfigFile<S> {
    pub fn with_storage(path: impl Into<NormalizedPath>, storage: S) -> Self {
        Self {
            path: path.into(),
            storage,
            options: ConfigFileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConfigFileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn options(&self) -> &ConfigFileOptions {
        &self.options
    }

    /// Directory holding the file.
    pub fn base_dir(&self) -> NormalizedPath {
        self.path.base_dir()
    }

    /// Resolves a path found in the document against [`base_dir`](Self::base_dir).
    pub fn resolve(&self, relative: &str) -> NormalizedPath {
        self.base_dir().resolve(relative)
    }

    /// Current file text; `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<String>> {
        Ok(self.storage.read_text(&self.path)?)
    }

    /// Decodes the file into `sections`.
    ///
    /// A missing file loads as empty and, unless disabled, is created.
    /// Per-section decode failures are listed in the report; call
    /// [`LoadReport::into_result`] to treat them as an error.
    pub fn load(&self, sections: Sections<'_>) -> Result<LoadReport> {
        let text = match self.storage.read_text(&self.path)? {
            Some(text) => text,
            None => {
                if self.options.create_if_missing {
                    self.storage
                        .write_text(&self.path, "", WriteMode::Overwrite)?;
                    tracing::info!(path = %self.path, "Created empty config file");
                }
                String::new()
            }
        };

        load::decode(&text, self.path.as_str(), sections, &self.options)
    }

    /// Generates the document for `content` and merges it into the file.
    pub fn save(&self, content: &SaveContent) -> Result<SaveOutcome> {
        self.reconcile(&content.to_document())
    }

    /// Merges an already generated document into the file.
    pub fn reconcile(&self, new_document: &str) -> Result<SaveOutcome> {
        save::reconcile_into(&self.storage, &self.path, new_document)
    }

    /// What [`save`](Self::save) would write, without writing.
    pub fn preview(&self, content: &SaveContent) -> Result<Reconciliation> {
        let old = self.read()?.unwrap_or_default();
        Ok(reconcile(&old, &content.to_document()))
    }
}
