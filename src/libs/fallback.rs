//! Update-or-reinstall recovery chain.
//!
//! An in-place update can fail when an existing install is inconsistent;
//! a clean uninstall followed by a fresh install is the recovery. The
//! uninstall is allowed to fail (there may be nothing left to remove), the
//! final install is not.

use crate::errors::Result;
use crate::log_warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome {
    Updated,
    Reinstalled,
}

/// `update`, and on failure `uninstall` then `install`.
///
/// `label` only feeds the log lines. The final install error is returned
/// to the caller instead of being swallowed.
pub fn update_or_reinstall<U, R, I>(
    label: &str,
    update: U,
    uninstall: R,
    install: I,
) -> Result<FallbackOutcome>
where
    U: FnOnce() -> Result<()>,
    R: FnOnce() -> Result<()>,
    I: FnOnce() -> Result<()>,
{
    let update_err = match update() {
        Ok(()) => return Ok(FallbackOutcome::Updated),
        Err(e) => e,
    };
    log_warn!(
        "{} Update failed ({}); removing all versions and reinstalling",
        label,
        update_err
    );

    if let Err(e) = uninstall() {
        log_warn!("{} Uninstall failed ({}); attempting install anyway", label, e);
    }

    install()?;
    Ok(FallbackOutcome::Reinstalled)
}
