// Idempotent PATH exports in the user's shell profile.
//
// `plan_path_export` is pure: it takes the current PATH string and the
// current profile contents and returns the new profile contents, or `None`
// when nothing needs to change. `ensure_path_export` is the thin caller
// that reads and writes the file through the `Host`.

use std::path::Path;

use colored::Colorize;

use crate::errors::Result;
use crate::libs::context::{Context, path_has_component};
use crate::{log_debug, log_info};

/// Header written above every line this tool appends.
const MARKER: &str = "# Added by setup-workstation";

/// The exact line appended for `dir`.
pub fn export_line(dir: &str) -> String {
    format!("export PATH=\"{dir}:$PATH\"")
}

/// Computes the profile contents after adding a PATH export for `dir`.
///
/// Returns `None` when `dir` is already on `current_path`, or when the
/// profile already carries the export line (the profile may simply not
/// have been re-sourced yet). Running this twice against its own output
/// therefore never duplicates the line.
pub fn plan_path_export(current_path: &str, profile: &str, dir: &str) -> Option<String> {
    if path_has_component(current_path, dir) {
        return None;
    }
    let line = export_line(dir);
    if profile.lines().any(|existing| existing.trim() == line) {
        return None;
    }

    let mut updated = profile.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    if !updated.is_empty() {
        updated.push('\n');
    }
    updated.push_str(MARKER);
    updated.push('\n');
    updated.push_str(&line);
    updated.push('\n');
    Some(updated)
}

/// Makes sure `dir` ends up on PATH for future shells and for the rest of
/// this session. Returns `true` when the profile was modified.
pub fn ensure_path_export(ctx: &mut Context<'_>, dir: &Path) -> Result<bool> {
    let dir_str = dir.to_string_lossy().into_owned();
    let profile_path = ctx.profile_path.clone();
    let existing = ctx.host.read_to_string(&profile_path)?.unwrap_or_default();

    let changed = match plan_path_export(ctx.path(), &existing, &dir_str) {
        Some(updated) => {
            ctx.host.write(&profile_path, &updated)?;
            log_info!(
                "[Shell Profile] Added {} to PATH in {}",
                dir_str.cyan(),
                profile_path.display().to_string().cyan()
            );
            true
        }
        None => {
            log_debug!(
                "[Shell Profile] {} already on PATH or exported in {}",
                dir_str,
                profile_path.display()
            );
            false
        }
    };

    ctx.prepend_path(dir);
    Ok(changed)
}
