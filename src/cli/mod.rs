// Command-line surface of `setup-workstation`.

// Clap parser and subcommand definitions.
pub mod cmd_enums;
