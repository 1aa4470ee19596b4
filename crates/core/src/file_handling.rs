//! Reading the configuration file and persisting panel output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::info;

use crate::config::{expand_path, PanelsConfig};
use crate::error::{Error, Result};
use crate::panel::PanelState;

/// Reads the panels configuration.
///
/// A missing file is not an error: the defaults are returned instead.
/// An empty file is treated the same way.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
/// - The YAML doesn't match the expected structure
pub fn get_config(config_path: &str) -> Result<PanelsConfig> {
    if !Path::exists(Path::new(config_path)) {
        info!("No configuration at `{}`, using defaults", config_path);
        return Ok(PanelsConfig::default());
    }

    let contents = fs::read_to_string(config_path)
        .map_err(|e| Error::io_error("config".to_string(), config_path.to_string(), e))?;

    if contents.trim().is_empty() {
        return Ok(PanelsConfig::default());
    }

    match serde_yaml::from_str::<PanelsConfig>(&contents) {
        Ok(config) => Ok(config),
        Err(e) => Err(Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )),
    }
}

/// Writes the panel's output to `path` and marks the panel as saved.
///
/// # Errors
///
/// Returns [`Error::SaveNotAllowed`] while the panel is running, before any
/// run has finished, or once the output has been saved. IO failures are
/// returned as [`Error::Io`].
pub fn save_output(path: &str, panel: &mut PanelState) -> Result<()> {
    if !panel.can_save() {
        return Err(Error::SaveNotAllowed);
    }

    let path = expand_path(path);
    let mut f = File::create(&path)
        .map_err(|e| Error::io_error("output".to_string(), path.clone(), e))?;

    f.write_all(panel.output().as_bytes())
        .map_err(|e| Error::io_error("output".to_string(), path.clone(), e))?;

    info!("Saved output to `{}`", path);
    panel.saved();
    Ok(())
}
