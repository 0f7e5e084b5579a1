// Azure CLI via Homebrew, its own self-upgrade and optional extensions.

use colored::Colorize;

use crate::errors::Result;
use crate::installers::brew::ensure_package;
use crate::libs::context::Context;
use crate::libs::pipeline::Completion;
use crate::log_info;
use crate::schemas::packages::PackageRef;

const AZ: &str = "az";

pub fn ensure(ctx: &mut Context<'_>) -> Result<Completion> {
    let cfg = ctx.config.azure_cli.clone();
    ensure_package(ctx, PackageRef::formula(&cfg.formula))?;

    if ctx.require(AZ).is_none() {
        return Ok(Completion::Done);
    }

    let upgrade = ctx
        .command(AZ)
        .args(["upgrade", "--yes", "--only-show-errors"]);
    ctx.best_effort("[Azure CLI] Self-upgrade", &upgrade);

    for extension in &cfg.extensions {
        let add = ctx.command(AZ).args([
            "extension",
            "add",
            "--upgrade",
            "--name",
            extension.as_str(),
            "--only-show-errors",
        ]);
        if ctx.best_effort(&format!("[Azure CLI] Adding extension {extension}"), &add) {
            log_info!("[Azure CLI] Extension {} ready", extension.green());
        }
    }

    log_info!("[Azure CLI] {} ready", AZ.green());
    Ok(Completion::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::host::fake::FakeHost;
    use crate::schemas::workstation::WorkstationConfig;

    #[test]
    fn no_extensions_by_default() {
        let host = FakeHost::new().with_executables(&["az"]);
        let mut ctx = Context::new(&host, WorkstationConfig::default(), "/usr/bin", "/tmp/p");
        ensure(&mut ctx).unwrap();
        assert!(host.ran("az upgrade --yes"));
        assert!(!host.ran("az extension"));
    }

    #[test]
    fn extension_failures_are_isolated() {
        let host = FakeHost::new()
            .with_executables(&["az"])
            .fail_on("az upgrade")
            .fail_on("--name broken");
        let mut config = WorkstationConfig::default();
        config.azure_cli.extensions = vec!["broken".into(), "account".into()];
        let mut ctx = Context::new(&host, config, "/usr/bin", "/tmp/p");

        assert_eq!(ensure(&mut ctx).unwrap(), Completion::Done);
        assert!(host.ran("az extension add --upgrade --name account"));
        assert_eq!(ctx.take_warnings().len(), 2);
    }
}
