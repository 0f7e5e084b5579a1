// Data structures shared across the crate: package descriptors for the
// Homebrew helper and the `workstation.yaml` configuration schema.

pub mod packages;
pub mod workstation;
