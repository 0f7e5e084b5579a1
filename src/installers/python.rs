// Python runtime via Homebrew, plus the user-level bin directory on PATH.
//
// `pip install --user` drops console scripts into `<user base>/bin`, which
// is not on PATH by default. After the runtime is in place this ensurer
// asks Python where that directory is and exports it from the shell
// profile, once.

use std::path::PathBuf;

use colored::Colorize;

use crate::errors::Result;
use crate::installers::brew::ensure_package;
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::libs::shell_profile::ensure_path_export;
use crate::libs::utilities::misc_utils::first_line;
use crate::schemas::packages::PackageRef;
use crate::{log_debug, log_info};

const USER_BIN_SCRIPT: &str =
    "import os, site; print(os.path.join(site.getuserbase(), 'bin'))";

pub fn ensure(ctx: &mut Context<'_>) -> Result<Completion> {
    let cfg = ctx.config.python.clone();
    ensure_package(ctx, PackageRef::formula(&cfg.formula))?;

    let Some(python) = ctx.require(&cfg.executable) else {
        return Ok(Completion::Done);
    };
    log_debug!("[Python] Using {}", python.display());

    if !cfg.bootstrap_packages.is_empty() {
        let upgrade = ctx
            .command(&cfg.executable)
            .args([
                "-m",
                "pip",
                "install",
                "--user",
                "--upgrade",
                "--break-system-packages",
            ])
            .args(cfg.bootstrap_packages.iter().map(String::as_str));
        ctx.best_effort("[Python] Upgrading packaging tools", &upgrade);
    }

    let query = ctx.command(&cfg.executable).args(["-c", USER_BIN_SCRIPT]);
    let user_bin = match ctx.run_checked(&query) {
        Ok(output) => first_line(&output.stdout).to_string(),
        Err(e) => {
            ctx.warn(format!("[Python] Could not determine the user bin directory: {e}"));
            return Ok(Completion::Done);
        }
    };
    if user_bin.is_empty() {
        ctx.warn("[Python] Interpreter reported an empty user bin directory");
        return Ok(Completion::Done);
    }

    ensure_path_export(ctx, &PathBuf::from(&user_bin))?;
    log_info!(
        "[Python] {} ready; user scripts in {}",
        cfg.executable.green(),
        user_bin.cyan()
    );
    Ok(Completion::Done)
}
