//! Configuration for the tool panels.
//!
//! This module resolves the configuration file path, expands shell variables
//! like `~` in paths, and holds the settings read from the YAML file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::execution::Launcher;

/// Default path for the configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.tool-panels/config.yml";
/// Default directory that saved output files are written to
const DEFAULT_OUTPUT_DIRECTORY: &str = "~";

/// Program used to run tools that need elevated privileges
pub const DEFAULT_ELEVATION_WRAPPER: &str = "pkexec";

/// Settings read from the configuration file. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelsConfig {
    pub elevation_wrapper: Option<String>,
    pub output_directory: Option<String>,
    /// Tool id to executable path, for tools installed outside `PATH`.
    pub executables: Option<HashMap<String, String>>,
}

impl PanelsConfig {
    #[must_use]
    pub fn launcher(&self) -> Launcher {
        Launcher::new(
            self.elevation_wrapper
                .as_deref()
                .unwrap_or(DEFAULT_ELEVATION_WRAPPER),
        )
    }

    /// The executable to run for `tool_id`, falling back to the id itself.
    #[must_use]
    pub fn executable_for(&self, tool_id: &str) -> String {
        self.executables
            .as_ref()
            .and_then(|executables| executables.get(tool_id))
            .map_or_else(|| tool_id.to_string(), |path| shellexpand::tilde(path).to_string())
    }

    /// Default location for a tool's saved output.
    #[must_use]
    pub fn default_output_path(&self, tool_id: &str) -> String {
        let directory = self
            .output_directory
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIRECTORY);
        let directory = shellexpand::tilde(directory);

        format!("{}/{}-output.txt", directory.trim_end_matches('/'), tool_id)
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use tool_panels_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Expands shell variables like `~` in a user supplied path.
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
