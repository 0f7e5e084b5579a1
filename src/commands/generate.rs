// Writes a starter `workstation.yaml` holding the built-in tool set, so
// users can see every knob and edit from there.

use anyhow::{Context as _, Result, bail};
use colored::Colorize;
use std::fs;

use crate::libs::paths::resolve_config_path;
use crate::schemas::workstation::WorkstationConfig;
use crate::{log_debug, log_info};

const HEADER: &str = "\
# setup-workstation configuration.
# Every key is optional; removing one restores its built-in default.
# on_failure: continue (record failures and keep going) | abort (stop at the first failure)
";

pub fn run(config_path: Option<String>, force: bool) -> Result<()> {
    let path = resolve_config_path(config_path.as_deref())?;
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
        log_debug!("Ensured directory {}", parent.display());
    }

    let body = serde_yaml::to_string(&WorkstationConfig::default())
        .context("serializing the default configuration")?;
    fs::write(&path, format!("{HEADER}{body}"))
        .with_context(|| format!("writing {}", path.display()))?;

    log_info!(
        "Wrote default configuration to {}",
        path.display().to_string().green()
    );
    Ok(())
}
