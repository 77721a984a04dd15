//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use termsheet_core::TermsheetConfig;
use tracing::debug;

/// Load the explicit config file, else the default one if it exists, else
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TermsheetConfig> {
    if let Some(path) = config_path {
        return Ok(TermsheetConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(TermsheetConfig::from_file(&default_path)?)
    } else {
        Ok(TermsheetConfig::default())
    }
}
