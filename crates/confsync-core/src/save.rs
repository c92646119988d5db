//! Reconciled write-back.

use crate::Result;
use confsync_blocks::{Reconciliation, reconcile};
use confsync_fs::{NormalizedPath, Storage, WriteMode};

/// Result of a save cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Whether the file was rewritten.
    pub written: bool,
    pub reconciliation: Reconciliation,
}

/// Merges `new_document` into the document stored at `path` and writes the
/// result back only when it differs.
///
/// A missing file is treated as empty. An unreadable file is an error and is
/// never overwritten.
pub fn reconcile_into<S: Storage + ?Sized>(
    storage: &S,
    path: &NormalizedPath,
    new_document: &str,
) -> Result<SaveOutcome> {
    let old = storage.read_text(path)?.unwrap_or_default();
    let reconciliation = reconcile(&old, new_document);

    if reconciliation.changed {
        storage.write_text(path, &reconciliation.text, WriteMode::Overwrite)?;
        tracing::info!(
            path = %path,
            blocks = reconciliation.blocks.len(),
            "Config file updated"
        );
    } else {
        tracing::debug!(path = %path, "Config file already up to date");
    }

    Ok(SaveOutcome {
        written: reconciliation.changed,
        reconciliation,
    })
}
