// This file contains the logic for `setup-workstation now` (also the default
// when no subcommand is given). It loads the configuration, builds the
// session around the real host and runs the provisioning pipeline.

use anyhow::{Context as _, Result, bail};
use std::path::PathBuf;

use crate::libs::config_loading::load_config;
use crate::libs::context::Context;
use crate::libs::host::SystemHost;
use crate::libs::paths::resolve_config_path;
use crate::libs::pipeline::{run_pipeline, steps};
use crate::libs::report::print_summary;
use crate::{log_debug, log_info};

/// Main entry point for the `now` command.
///
/// 1. Resolves and loads `workstation.yaml` (defaults when absent).
/// 2. Seeds the session PATH from the process environment.
/// 3. Runs every ensurer in the fixed order.
/// 4. Prints the summary and fails if any step failed.
pub fn run(config_path: Option<String>) -> Result<()> {
    log_debug!("Entered now::run() function.");

    let config_path = resolve_config_path(config_path.as_deref())
        .context("resolving the configuration path")?;
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let path = std::env::var("PATH").unwrap_or_default();
    let profile = PathBuf::from(&config.shell_profile);
    let host = SystemHost;
    let mut ctx = Context::new(&host, config, path, profile);

    log_info!("Provisioning workstation...");
    let report = run_pipeline(&mut ctx, &steps());
    print_summary(&report);

    let failures = report.failures();
    if failures > 0 {
        bail!("{failures} provisioning step(s) failed");
    }
    log_debug!("Exited now::run() function.");
    Ok(())
}
