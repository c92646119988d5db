//! Behaviour switches for [`ConfigFile`](crate::ConfigFile).

use serde::{Deserialize, Serialize};

/// Options controlling how a configuration file is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConfigFileOptions {
    /// Create an empty file on load when none exists.
    pub create_if_missing: bool,

    /// Fall back to an ASCII case-insensitive match when a section name is
    /// not found verbatim.
    pub lenient_keys: bool,
}

impl Default for ConfigFileOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            lenient_keys: true,
        }
    }
}

impl ConfigFileOptions {
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn lenient_keys(mut self, lenient: bool) -> Self {
        self.lenient_keys = lenient;
        self
    }
}
