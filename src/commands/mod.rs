// Register application subcommands.
// Each module corresponds to a specific `setup-workstation` command-line action.

// Writes a starter `workstation.yaml`.
pub mod generate;
// Runs the provisioning pipeline.
pub mod now;
// Displays the version.
pub mod version;
