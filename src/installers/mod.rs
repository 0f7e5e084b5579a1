// Ensurers, one module per tool family. Each exposes functions with the
// `fn(&mut Context) -> Result<Completion>` shape the pipeline runs.

/// Homebrew bootstrap, prefix detection and the generic install/upgrade helper.
pub(crate) mod brew;

/// Command Line Tools presence check.
pub(crate) mod clt;

/// Python runtime and the user bin directory export.
pub(crate) mod python;

/// Node.js runtime.
pub(crate) mod node;

/// Global npm packages.
pub(crate) mod npm;

/// PowerShell cask, `pwsh` link and module management.
pub(crate) mod powershell;

/// Azure CLI and its extensions.
pub(crate) mod azure_cli;

/// Terraform and terraform-docs from their taps.
pub(crate) mod terraform;
