//! Self-documenting, upgrade-tolerant configuration files.
//!
//! An application registers named sections in a [`SaveContent`]; each one is
//! rendered as a banner-delimited block with comments taken from the field
//! descriptions. Saving merges the generated blocks into the existing file:
//! blocks the application still declares are regenerated, blocks it no
//! longer declares are kept verbatim, new blocks are appended (a `DB Config`
//! block goes near the top). Loading decodes sections back onto the caller's
//! records.
//!
//! ```
//! use confsync_core::{ConfigFile, SaveContent, Sections};
//! use confsync_fs::MemoryStorage;
//!
//! let file = ConfigFile::with_storage("app.yaml", MemoryStorage::new());
//!
//! let mut content = SaveContent::new();
//! content.add("Port", "Listener port", &8080u16);
//! assert!(file.save(&content).unwrap().written);
//! assert!(!file.save(&content).unwrap().written);
//!
//! let mut port = 0u16;
//! file.load(Sections::new().with("Port", &mut port)).unwrap().into_result().unwrap();
//! assert_eq!(port, 8080);
//! ```

pub mod content;
pub mod error;
pub mod file;
pub mod load;
pub mod options;
pub mod save;

pub use content::{BASE_SECTION, SaveContent, SectionEntry};
pub use error::{DecodeError, Error, Result, SectionError};
pub use file::ConfigFile;
pub use load::{LoadReport, SectionTarget, Sections, load_document};
pub use options::ConfigFileOptions;
pub use save::{SaveOutcome, reconcile_into};
