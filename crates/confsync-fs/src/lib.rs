//! Storage primitives for confsync
//!
//! Provides normalized paths, atomic whole-file writes and the [`Storage`]
//! seam the reconciliation engine reads and writes documents through.

pub mod error;
pub mod io;
pub mod path;
pub mod storage;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use storage::{FsStorage, MemoryStorage, Storage, WriteMode};
