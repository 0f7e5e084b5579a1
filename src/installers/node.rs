// Node.js runtime via Homebrew. The formula also provides `npm`, which the
// global package step relies on.

use colored::Colorize;

use crate::errors::Result;
use crate::installers::brew::ensure_package;
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::libs::utilities::misc_utils::first_line;
use crate::log_info;
use crate::schemas::packages::PackageRef;

pub fn ensure(ctx: &mut Context<'_>) -> Result<Completion> {
    let formula = ctx.config.node.formula.clone();
    ensure_package(ctx, PackageRef::formula(&formula))?;

    let node = ctx.require("node");
    ctx.require("npm");

    if node.is_some() {
        let version = ctx.command("node").arg("--version");
        if let Ok(output) = ctx.run_checked(&version) {
            log_info!("[Node] node {} ready", first_line(&output.stdout).green());
        }
    }
    Ok(Completion::Done)
}
