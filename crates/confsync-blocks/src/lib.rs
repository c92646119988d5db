//! Block extraction and reconciliation for confsync documents.
//!
//! A confsync document is a sequence of sections, each opened by a banner:
//!
//! ```text
//! ############################### Base Config ###############################
//! # Service identity
//! Base: 
//!   Name: "svc"
//!
//! ############################### Log Config ###############################
//! Log: 
//!   Level: 3
//! ```
//!
//! - [`parser`] splits a document into [`Block`]s.
//! - [`banner`] recognizes banner lines and derives identity keys.
//! - [`reconcile`](mod@reconcile) merges an on-disk document with a regenerated one.

pub mod banner;
pub mod parser;
pub mod reconcile;

pub use banner::{format_banner, identity_key, is_banner};
pub use parser::{Block, extract_blocks, find_block, has_block, preamble};
pub use reconcile::{BlockAction, Reconciliation, reconcile, render_blocks};
