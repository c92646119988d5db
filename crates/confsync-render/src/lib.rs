//! Comment-annotated YAML rendering for confsync.
//!
//! Values are converted to a [`Node`] tree through the [`Structured`] trait,
//! then [`render`]ed to text. Records carry a static field table (on-disk
//! name, optional description) instead of relying on runtime reflection:
//!
//! ```
//! use confsync_render::{render, Node, Record};
//! use std::collections::HashSet;
//!
//! let node: Node = Record::new()
//!     .described("Level", "0 = quiet, 5 = trace", &3u8)
//!     .field("Outputs", &vec!["stdout".to_string()])
//!     .into();
//!
//! let text = render(&node, 0, &HashSet::new());
//! assert_eq!(text, "# 0 = quiet, 5 = trace\nLevel: 3\nOutputs: \n  - \"stdout\"");
//! ```

pub mod node;
pub mod render;
pub mod structured;

pub use node::{Field, Node, Record};
pub use render::{map_key, quote, render, render_entry};
pub use structured::Structured;
