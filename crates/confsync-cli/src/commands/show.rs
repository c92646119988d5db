//! Show command implementation
//!
//! Decodes one section of a configuration file and prints it as JSON.

use std::path::Path;

use serde_json::Value;

use confsync_core::{ConfigFile, ConfigFileOptions, Sections};

use crate::error::{CliError, Result};

/// Decoded content of `section`, or a user error when the file lacks it.
pub fn section_value(file: &Path, section: &str) -> Result<Value> {
    let config = ConfigFile::open(file)
        .with_options(ConfigFileOptions::default().create_if_missing(false));

    // Decoded as YAML first: JSON values cannot hold numeric map keys.
    let mut value = serde_yaml::Value::Null;
    let report = config
        .load(Sections::new().with(section, &mut value))?
        .into_result()?;

    if report.loaded.is_empty() {
        return Err(CliError::user(format!(
            "Section '{section}' not found in {}",
            config.path()
        )));
    }
    Ok(serde_json::to_value(value)?)
}

/// Run the show command
pub fn run_show(file: &Path, section: &str) -> Result<()> {
    let value = section_value(file, section)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
