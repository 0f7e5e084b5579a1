// PowerShell (cask) and one PowerShell module.
//
// The cask ships `pwsh` inside the app bundle. When the bare command does
// not resolve, a single symlink is created in the link directory. Modules
// are then managed through `pwsh` itself: the gallery is trusted first, and
// the module goes through the update-or-reinstall chain.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::errors::Result;
use crate::installers::brew::ensure_package;
use crate::libs::context::Context;
use crate::libs::fallback::{FallbackOutcome, update_or_reinstall};
use crate::libs::host::CommandSpec;
use crate::libs::pipeline::Completion;
use crate::schemas::packages::PackageRef;
use crate::{log_debug, log_info};

const PWSH: &str = "pwsh";

/// `pwsh` invocation that runs one script non-interactively.
fn pwsh_script(ctx: &Context<'_>, script: &str) -> CommandSpec {
    ctx.command(PWSH)
        .args(["-NoLogo", "-NoProfile", "-NonInteractive", "-Command"])
        .arg(script)
}

pub fn ensure(ctx: &mut Context<'_>) -> Result<Completion> {
    let cfg = ctx.config.powershell.clone();
    ensure_package(ctx, PackageRef::cask(&cfg.cask))?;

    if ctx.resolve(PWSH).is_none() {
        link_app_binary(ctx, Path::new(&cfg.app_binary), Path::new(&cfg.link_dir));
    }
    if ctx.require(PWSH).is_none() {
        return Ok(Completion::Done);
    }

    let trust = pwsh_script(
        ctx,
        &format!(
            "Set-PSRepository -Name {} -InstallationPolicy Trusted",
            cfg.repository
        ),
    );
    ctx.best_effort(&format!("[PowerShell] Trusting {}", cfg.repository), &trust);

    ensure_module(ctx, &cfg.module, &cfg.repository)?;
    log_info!(
        "[PowerShell] {} ready with module {}",
        PWSH.green(),
        cfg.module.green()
    );
    Ok(Completion::Done)
}

/// Links the bundled binary into `link_dir`. Best-effort; at most one link.
fn link_app_binary(ctx: &mut Context<'_>, app_binary: &Path, link_dir: &Path) {
    if !ctx.host.exists(app_binary) {
        ctx.warn(format!(
            "[PowerShell] {} not found; cannot link {}",
            app_binary.display(),
            PWSH
        ));
        return;
    }
    let link: PathBuf = link_dir.join(PWSH);
    if ctx.host.exists(&link) {
        log_debug!("[PowerShell] {} already exists; leaving it alone", link.display());
    } else {
        match ctx.host.symlink(app_binary, &link) {
            Ok(()) => log_info!(
                "[PowerShell] Linked {} -> {}",
                link.display().to_string().cyan(),
                app_binary.display()
            ),
            Err(e) => {
                ctx.warn(format!("[PowerShell] Could not create {}: {e}", link.display()));
                return;
            }
        }
    }
    ctx.prepend_path(link_dir);
}

fn ensure_module(ctx: &mut Context<'_>, module: &str, repository: &str) -> Result<()> {
    let probe = pwsh_script(
        ctx,
        &format!("if (Get-Module -ListAvailable -Name {module}) {{ exit 0 }} else {{ exit 1 }}"),
    );
    let present = ctx.run(&probe)?.success();

    let install = pwsh_script(
        ctx,
        &format!(
            "Install-Module -Name {module} -Repository {repository} -Scope CurrentUser -Force -AllowClobber -ErrorAction Stop"
        ),
    );

    if !present {
        log_info!("[PowerShell] Installing module {}", module.bold());
        ctx.run_checked(&install)?;
        return Ok(());
    }

    let update = pwsh_script(
        ctx,
        &format!("Update-Module -Name {module} -Force -ErrorAction Stop"),
    );
    let uninstall = pwsh_script(
        ctx,
        &format!("Uninstall-Module -Name {module} -AllVersions -Force -ErrorAction Stop"),
    );

    log_info!("[PowerShell] Updating module {}", module.bold());
    let session: &Context<'_> = ctx;
    let outcome = update_or_reinstall(
        "[PowerShell]",
        || session.run_checked(&update).map(|_| ()),
        || session.run_checked(&uninstall).map(|_| ()),
        || session.run_checked(&install).map(|_| ()),
    )?;
    if outcome == FallbackOutcome::Reinstalled {
        ctx.warn(format!(
            "[PowerShell] Update of {module} failed; module was reinstalled"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProvisionError;
    use crate::libs::host::fake::FakeHost;
    use crate::schemas::workstation::WorkstationConfig;

    const APP: &str = "/Applications/PowerShell.app/Contents/MacOS/pwsh";

    fn ctx(host: &FakeHost) -> Context<'_> {
        Context::new(host, WorkstationConfig::default(), "/usr/bin", "/tmp/p")
    }

    #[test]
    fn links_bundled_binary_when_pwsh_is_not_on_path() {
        let host = FakeHost::new().with_path(APP);
        let mut ctx = ctx(&host);
        link_app_binary(&mut ctx, Path::new(APP), Path::new("/usr/local/bin"));

        assert_eq!(
            host.links(),
            vec![(PathBuf::from(APP), PathBuf::from("/usr/local/bin/pwsh"))]
        );
        assert!(ctx.path().starts_with("/usr/local/bin:"));
    }

    #[test]
    fn existing_link_is_not_recreated() {
        let host = FakeHost::new().with_path(APP).with_path("/usr/local/bin/pwsh");
        let mut ctx = ctx(&host);
        link_app_binary(&mut ctx, Path::new(APP), Path::new("/usr/local/bin"));
        assert!(host.links().is_empty());
    }

    #[test]
    fn resolvable_pwsh_skips_linking_and_trusts_gallery() {
        let host = FakeHost::new().with_executables(&["pwsh"]);
        let mut ctx = ctx(&host);
        ensure(&mut ctx).unwrap();

        assert!(host.links().is_empty());
        assert!(host.ran("Set-PSRepository -Name PSGallery -InstallationPolicy Trusted"));
        assert!(host.ran("Update-Module -Name Az"));
        assert!(!host.ran("Uninstall-Module"));
    }

    #[test]
    fn absent_module_is_installed_directly() {
        let host = FakeHost::new()
            .with_executables(&["pwsh"])
            .fail_on("Get-Module -ListAvailable");
        let mut ctx = ctx(&host);
        ensure(&mut ctx).unwrap();

        assert!(host.ran("Install-Module -Name Az"));
        assert!(!host.ran("Update-Module"));
    }

    #[test]
    fn failed_update_falls_back_to_uninstall_then_install() {
        let host = FakeHost::new()
            .with_executables(&["pwsh"])
            .fail_on("Update-Module");
        let mut ctx = ctx(&host);
        ensure(&mut ctx).unwrap();

        let update = host.position("Update-Module").unwrap();
        let uninstall = host.position("Uninstall-Module -Name Az -AllVersions").unwrap();
        let install = host.position("Install-Module -Name Az").unwrap();
        assert!(update < uninstall && uninstall < install);
        assert!(ctx.take_warnings().iter().any(|w| w.contains("reinstalled")));
    }

    #[test]
    fn failed_reinstall_surfaces_an_error() {
        let host = FakeHost::new()
            .with_executables(&["pwsh"])
            .fail_on("Update-Module")
            .fail_on("Install-Module");
        let mut ctx = ctx(&host);
        let err = ensure(&mut ctx).unwrap_err();
        assert!(matches!(err, ProvisionError::CommandFailed { .. }));
    }
}
