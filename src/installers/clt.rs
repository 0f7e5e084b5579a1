// Command Line Tools (compiler toolchain) check.
//
// Nothing else can be installed without the CLT, and its installer is a GUI
// dialog the provisioner cannot wait on. When the tools are missing, the
// dialog is started and the run halts, asking the user to re-run.

use colored::Colorize;

use crate::errors::{ProvisionError, Result};
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::{log_info, log_warn};

pub fn ensure(ctx: &mut Context<'_>) -> Result<Completion> {
    let probe = ctx.command("xcode-select").arg("-p");
    let output = ctx.run(&probe)?;
    if output.success() {
        log_info!(
            "[CLT] Command Line Tools found at {}",
            output.stdout.trim().cyan()
        );
        return Ok(Completion::Done);
    }

    log_warn!("[CLT] Command Line Tools are missing; starting the installer");
    // Fails when an install is already in progress; the outcome is the same.
    let install = ctx.command("xcode-select").arg("--install");
    ctx.best_effort("[CLT] Starting the Command Line Tools installer", &install);
    Err(ProvisionError::CltInstallPending)
}
