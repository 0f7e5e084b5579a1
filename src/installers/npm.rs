// Global npm packages.
//
// Each entry is checked and installed on its own; one failing package is
// recorded as a warning and the loop moves on. Without `npm` the whole
// step is skipped rather than failed.

use colored::Colorize;

use crate::errors::Result;
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::{log_debug, log_info, log_warn};

/// Package name without a version or tag suffix.
///
/// Scoped names keep their leading `@`:
/// `@azure/static-web-apps-cli@1.1` → `@azure/static-web-apps-cli`.
pub fn npm_package_name(spec: &str) -> &str {
    let search_from = usize::from(spec.starts_with('@'));
    match spec[search_from..].find('@') {
        Some(idx) => &spec[..search_from + idx],
        None => spec,
    }
}

pub fn install_global_packages(ctx: &mut Context<'_>) -> Result<Completion> {
    if ctx.resolve("npm").is_none() {
        log_warn!("[npm] npm not found on PATH; skipping global packages");
        return Ok(Completion::Skipped("npm not found".to_string()));
    }

    let packages = ctx.config.npm.packages.clone();
    let mut installed = 0usize;
    for spec in &packages {
        let name = npm_package_name(spec);
        let query = ctx.command("npm").args(["ls", "-g", "--depth=0", name]);
        match ctx.run(&query) {
            Ok(output) if output.success() => {
                log_debug!("[npm] {} already installed", name);
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                ctx.warn(format!("[npm] Could not query {name}: {e}"));
                continue;
            }
        }

        log_info!("[npm] Installing {}", spec.bold());
        let install = ctx
            .command("npm")
            .args(["install", "-g", spec.as_str()])
            .inherit_output();
        if ctx.best_effort(&format!("[npm] Installing {spec}"), &install) {
            installed += 1;
        }
    }

    log_info!(
        "[npm] {} package(s) checked, {} newly installed",
        packages.len(),
        installed.to_string().green()
    );
    Ok(Completion::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::host::fake::FakeHost;
    use crate::schemas::workstation::WorkstationConfig;

    fn ctx_with<'a>(host: &'a FakeHost, packages: &[&str]) -> Context<'a> {
        let mut config = WorkstationConfig::default();
        config.npm.packages = packages.iter().map(|p| p.to_string()).collect();
        Context::new(host, config, "/usr/bin", "/tmp/p")
    }

    #[test]
    fn strips_versions_but_keeps_scopes() {
        assert_eq!(npm_package_name("typescript"), "typescript");
        assert_eq!(npm_package_name("azure-functions-core-tools@4"), "azure-functions-core-tools");
        assert_eq!(npm_package_name("@azure/static-web-apps-cli"), "@azure/static-web-apps-cli");
        assert_eq!(npm_package_name("@azure/static-web-apps-cli@1.1"), "@azure/static-web-apps-cli");
        assert_eq!(npm_package_name("@"), "@");
    }

    #[test]
    fn installs_only_missing_packages() {
        let host = FakeHost::new()
            .with_executables(&["npm"])
            .fail_on("npm ls -g --depth=0 azure-functions-core-tools");
        let mut ctx = ctx_with(&host, &["typescript", "azure-functions-core-tools@4"]);

        assert_eq!(install_global_packages(&mut ctx).unwrap(), Completion::Done);
        assert!(!host.ran("npm install -g typescript"));
        assert!(host.ran("npm install -g azure-functions-core-tools@4"));
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let host = FakeHost::new()
            .with_executables(&["npm"])
            .fail_on("npm ls")
            .fail_on("npm install -g broken-package");
        let mut ctx = ctx_with(&host, &["first", "broken-package", "last"]);

        assert_eq!(install_global_packages(&mut ctx).unwrap(), Completion::Done);
        let broken = host.position("npm install -g broken-package").unwrap();
        let last = host.position("npm install -g last").unwrap();
        assert!(host.ran("npm install -g first"));
        assert!(broken < last);
        let warnings = ctx.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("broken-package"));
    }

    #[test]
    fn missing_npm_skips_the_step() {
        let host = FakeHost::new();
        let mut ctx = ctx_with(&host, &["typescript"]);
        assert!(matches!(
            install_global_packages(&mut ctx).unwrap(),
            Completion::Skipped(_)
        ));
        assert!(host.commands().is_empty());
    }
}
