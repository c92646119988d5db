//! Command implementations for confsync-cli

pub mod blocks;
pub mod merge;
pub mod show;

pub use blocks::run_blocks;
pub use merge::run_merge;
pub use show::run_show;
