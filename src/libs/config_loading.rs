use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::errors::{ProvisionError, Result};
use crate::libs::utilities::misc_utils::expand_path;
use crate::schemas::workstation::WorkstationConfig;
use crate::{log_debug, log_info, log_warn};

/// Loads `workstation.yaml`, falling back to the built-in tool set.
///
/// A missing file is not an error: the provisioner is meant to run on a
/// bare machine with no configuration at all. A file that exists but does
/// not parse is an error, since silently ignoring it would install
/// something other than what the user asked for.
///
/// Path-valued fields are tilde-expanded before the config is returned.
pub fn load_config(path: &Path) -> Result<WorkstationConfig> {
    log_debug!("Attempting to load configuration from: {}", path.display());

    let mut config = match fs::read_to_string(path) {
        Ok(contents) => {
            let cfg: WorkstationConfig =
                serde_yaml::from_str(&contents).map_err(|source| ProvisionError::Config {
                    path: path.to_path_buf(),
                    source,
                })?;
            log_info!(
                "Using configuration file: {}",
                path.display().to_string().cyan()
            );
            cfg
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log_debug!(
                "No configuration at {}; using the built-in tool set",
                path.display()
            );
            WorkstationConfig::default()
        }
        Err(e) => {
            log_warn!(
                "Configuration file {} is unreadable: {}",
                path.display().to_string().yellow(),
                e
            );
            return Err(ProvisionError::io(path, e));
        }
    };

    expand_config_paths(&mut config);

    match serde_json::to_string_pretty(&config) {
        Ok(pretty) => log_debug!("Effective configuration:\n{}", pretty),
        Err(e) => log_debug!("Effective configuration: {:?} ({})", config, e),
    }
    Ok(config)
}

fn expand_config_paths(config: &mut WorkstationConfig) {
    let expand = |p: &str| expand_path(p).to_string_lossy().into_owned();
    config.shell_profile = expand(&config.shell_profile);
    config.powershell.app_binary = expand(&config.powershell.app_binary);
    config.powershell.link_dir = expand(&config.powershell.link_dir);
}
