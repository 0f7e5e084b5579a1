// Core machinery shared by the commands and the installers.

// Loads `workstation.yaml` with defaults and tilde expansion.
pub mod config_loading;
// Per-run session: PATH, environment overrides, warnings.
pub mod context;
// Update-or-reinstall recovery chain.
pub mod fallback;
// Side-effect capability (processes, files, symlinks).
pub mod host;
// Default and user-supplied config locations.
pub mod paths;
// Fixed step order and failure policy.
pub mod pipeline;
// Summary table.
pub mod report;
// Idempotent PATH exports in the shell profile.
pub mod shell_profile;
pub mod utilities;
