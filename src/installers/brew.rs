//! # Homebrew
//!
//! Everything that talks to `brew` directly:
//!
//! - **Prefix detection** ([`detect_brew_prefix`]): pure filesystem probing for
//!   the Apple-silicon or legacy Intel install location.
//! - **Bootstrap** ([`bootstrap`]): installs Homebrew when missing, loads
//!   `brew shellenv` into the session and opts out of analytics.
//! - **Generic install/upgrade helper** ([`ensure_package`]): the one routine
//!   every per-tool ensurer goes through.
//!
//! ## Install vs. upgrade
//!
//! When a package is already registered, it is upgraded and an upgrade
//! failure is only a warning: the installed version is still usable. When
//! it is absent, it is installed and an install failure ends that tool's
//! ensurer, because its follow-up steps need the package.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::errors::{ProvisionError, Result};
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::libs::utilities::misc_utils::first_line;
use crate::schemas::packages::PackageRef;
use crate::{log_debug, log_error, log_info, log_warn};

/// Apple-silicon install prefix, also the fallback when nothing is found.
pub const APPLE_SILICON_PREFIX: &str = "/opt/homebrew";
/// Legacy Intel install prefix.
pub const INTEL_PREFIX: &str = "/usr/local";

/// Returns the Homebrew prefix by probing marker paths in priority order.
///
/// 1. `/opt/homebrew/bin/brew` → `/opt/homebrew`
/// 2. `/usr/local/bin/brew` or `/usr/local/Homebrew` → `/usr/local`
/// 3. nothing found → `/opt/homebrew`
///
/// `exists` is injected so the probing is deterministic under test.
pub fn detect_brew_prefix(exists: impl Fn(&Path) -> bool) -> PathBuf {
    if exists(&Path::new(APPLE_SILICON_PREFIX).join("bin/brew")) {
        return PathBuf::from(APPLE_SILICON_PREFIX);
    }
    let intel = Path::new(INTEL_PREFIX);
    if exists(&intel.join("bin/brew")) || exists(&intel.join("Homebrew")) {
        return PathBuf::from(INTEL_PREFIX);
    }
    PathBuf::from(APPLE_SILICON_PREFIX)
}

/// Capability for asking a package manager whether a package is registered.
pub trait PackageQuery {
    fn is_installed(&self, pkg: PackageRef<'_>) -> bool;
}

/// `brew list`-backed query over the session's host.
pub struct Homebrew<'c, 'h> {
    ctx: &'c Context<'h>,
}

impl<'c, 'h> Homebrew<'c, 'h> {
    pub fn new(ctx: &'c Context<'h>) -> Self {
        Homebrew { ctx }
    }
}

impl PackageQuery for Homebrew<'_, '_> {
    /// `brew list --formula|--cask <name>` exits 0 only for registered packages.
    /// A brew that cannot be launched counts as "not installed".
    fn is_installed(&self, pkg: PackageRef<'_>) -> bool {
        let cmd = self
            .ctx
            .command("brew")
            .args(["list", pkg.kind.brew_flag(), pkg.name]);
        match self.ctx.run(&cmd) {
            Ok(output) => {
                log_debug!(
                    "[Homebrew] {} is {}installed",
                    pkg,
                    if output.success() { "" } else { "not " }
                );
                output.success()
            }
            Err(e) => {
                log_warn!("[Homebrew] Could not query {}: {}", pkg, e);
                false
            }
        }
    }
}

/// What [`ensure_package`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Installed,
    Upgraded,
    /// Package was present but `brew upgrade` failed; the old version stays.
    UpgradeFailed,
}

/// Installs `pkg` when absent, upgrades it when present.
pub fn ensure_package(ctx: &mut Context<'_>, pkg: PackageRef<'_>) -> Result<EnsureOutcome> {
    let flag = pkg.kind.brew_flag();

    if Homebrew::new(ctx).is_installed(pkg) {
        log_info!("[Homebrew] {} is installed; upgrading", pkg.name.bold());
        let upgrade = ctx
            .command("brew")
            .args(["upgrade", flag, pkg.name])
            .inherit_output();
        if ctx.best_effort(&format!("[Homebrew] Upgrading {pkg}"), &upgrade) {
            return Ok(EnsureOutcome::Upgraded);
        }
        return Ok(EnsureOutcome::UpgradeFailed);
    }

    log_info!("[Homebrew] Installing {}", pkg.to_string().bold());
    let install = ctx
        .command("brew")
        .args(["install", flag, pkg.name])
        .inherit_output();
    ctx.run_checked(&install)?;
    log_info!("[Homebrew] Installed {}", pkg.name.green());
    Ok(EnsureOutcome::Installed)
}

/// Registers a third-party tap. Failure is fatal for the calling ensurer.
pub fn tap(ctx: &Context<'_>, repository: &str) -> Result<()> {
    log_debug!("[Homebrew] Tapping {}", repository);
    let cmd = ctx.command("brew").args(["tap", repository]);
    ctx.run_checked(&cmd)?;
    Ok(())
}

/// Pulls `export NAME="value";` assignments out of `brew shellenv` output.
///
/// Only literal values are taken; lines that reference other variables
/// (`${PATH+:$PATH}`, `${MANPATH-}`) or run commands are skipped, since PATH
/// is handled separately by prepending the prefix's `bin`/`sbin`.
pub fn parse_shellenv(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("export ")?;
            let (key, value) = rest.split_once('=')?;
            let value = value.trim_end_matches(';').trim_matches('"');
            if key.is_empty() || value.contains('$') {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Ensures Homebrew is installed and loaded into the session.
pub fn bootstrap(ctx: &mut Context<'_>) -> Result<Completion> {
    let prefix = detect_brew_prefix(|p| ctx.host.exists(p));
    log_debug!("[Homebrew] Probed prefix: {}", prefix.display());

    if ctx.resolve("brew").is_none() && !ctx.host.exists(&prefix.join("bin/brew")) {
        let url = ctx.config.homebrew.install_script_url.clone();
        log_info!("[Homebrew] Not found; running the official installer");
        let script = format!("/bin/bash -c \"$(curl -fsSL {url})\"");
        let install = ctx
            .command("/bin/bash")
            .args(["-c", script.as_str()])
            .env("NONINTERACTIVE", "1")
            .inherit_output();
        // Installer failure halts the run, same as a brew that never resolves.
        if let Err(e) = ctx.run_checked(&install) {
            log_error!("[Homebrew] Installer failed: {}", e);
            return Err(ProvisionError::HomebrewUnavailable(prefix));
        }
    } else {
        log_debug!("[Homebrew] Already installed");
    }

    // The installer decides the prefix, so probe again.
    let prefix = detect_brew_prefix(|p| ctx.host.exists(p));
    ctx.prepend_path(&prefix.join("sbin"));
    ctx.prepend_path(&prefix.join("bin"));

    if ctx.resolve("brew").is_none() {
        return Err(ProvisionError::HomebrewUnavailable(prefix));
    }

    let shellenv = ctx.command("brew").arg("shellenv");
    match ctx.run_checked(&shellenv) {
        Ok(output) => {
            for (key, value) in parse_shellenv(&output.stdout) {
                log_debug!("[Homebrew] shellenv: {}={}", key, value);
                ctx.set_env(&key, &value);
            }
            log_debug!(
                "[Homebrew] Session HOMEBREW_PREFIX: {}",
                ctx.env_var("HOMEBREW_PREFIX").unwrap_or("(unset)")
            );
        }
        Err(e) => ctx.warn(format!("[Homebrew] Loading shellenv failed: {e}")),
    }

    if ctx.config.homebrew.disable_analytics {
        ctx.set_env("HOMEBREW_NO_ANALYTICS", "1");
        let off = ctx.command("brew").args(["analytics", "off"]);
        ctx.best_effort("[Homebrew] Disabling analytics", &off);
    }

    let version = ctx.command("brew").arg("--version");
    if let Ok(output) = ctx.run_checked(&version) {
        log_info!(
            "[Homebrew] Ready at {} ({})",
            prefix.display().to_string().cyan(),
            first_line(&output.stdout)
        );
    }
    Ok(Completion::Done)
}
