// Terraform and terraform-docs.
//
// Both come from third-party taps that must be registered before the
// install. Their version banners run to several lines (provider lists,
// upgrade notices), so only the first line is logged.

use colored::Colorize;

use crate::errors::Result;
use crate::installers::brew::{ensure_package, tap};
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::libs::utilities::misc_utils::first_line;
use crate::log_info;
use crate::schemas::packages::PackageRef;
use crate::schemas::workstation::TappedFormulaConfig;

pub fn ensure_terraform(ctx: &mut Context<'_>) -> Result<Completion> {
    let cfg = ctx.config.terraform.clone();
    ensure_tapped(ctx, "[Terraform]", &cfg, "terraform", "-version")
}

pub fn ensure_terraform_docs(ctx: &mut Context<'_>) -> Result<Completion> {
    let cfg = ctx.config.terraform_docs.clone();
    ensure_tapped(ctx, "[terraform-docs]", &cfg, "terraform-docs", "--version")
}

fn ensure_tapped(
    ctx: &mut Context<'_>,
    label: &str,
    cfg: &TappedFormulaConfig,
    executable: &str,
    version_flag: &str,
) -> Result<Completion> {
    if !cfg.tap.is_empty() {
        tap(ctx, &cfg.tap)?;
    }
    ensure_package(ctx, PackageRef::formula(&cfg.formula))?;

    if ctx.require(executable).is_none() {
        return Ok(Completion::Done);
    }

    let version = ctx.command(executable).arg(version_flag);
    match ctx.run_checked(&version) {
        Ok(output) => log_info!("{} {}", label, first_line(&output.stdout).green()),
        Err(e) => ctx.warn(format!("{label} Could not read version: {e}")),
    }
    Ok(Completion::Done)
}
