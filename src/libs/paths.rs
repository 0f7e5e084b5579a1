use colored::Colorize;
use std::path::PathBuf;

use crate::errors::{ProvisionError, Result};
use crate::libs::utilities::misc_utils::expand_path;
use crate::log_debug;

/// Directory holding `workstation.yaml`, relative to the home directory.
pub const APP_DIR: &str = ".setup-workstation";
pub const CONFIG_FILE: &str = "workstation.yaml";

/// Default location of the configuration file: `~/.setup-workstation/workstation.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ProvisionError::HomeDirUnavailable)?;
    Ok(home.join(APP_DIR).join(CONFIG_FILE))
}

/// Resolves the configuration path from an optional `--config` argument.
/// A user-supplied path is tilde-expanded; no argument means the default location.
pub fn resolve_config_path(config_path: Option<&str>) -> Result<PathBuf> {
    let resolved = match config_path {
        Some(p) => expand_path(p),
        None => default_config_path()?,
    };
    log_debug!(
        "[Paths] Configuration file resolved to {}",
        resolved.display().to_string().cyan()
    );
    Ok(resolved)
}
