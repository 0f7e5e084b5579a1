use clap::{Parser, Subcommand};

/// Defines the command-line interface (CLI) for 'setup-workstation'.
/// `#[derive(Parser)]` generates the argument parsing code via `clap`.
#[derive(Parser)]
#[command(name = "setup-workstation")]
#[command(about = "Install or upgrade the standard macOS developer toolset", long_about = None)]
pub struct Cli {
    /// Enables detailed debug output: every command line, its captured output
    /// and the effective configuration.
    /// Can also be switched on with `SETUP_WORKSTATION_DEBUG=true`.
    #[arg(short, long, global = true, env = "SETUP_WORKSTATION_DEBUG")]
    pub(crate) debug: bool,

    /// Path to workstation.yaml (default: ~/.setup-workstation/workstation.yaml).
    /// Accepted before or after the subcommand.
    #[arg(long, global = true)]
    pub(crate) config: Option<String>,

    /// Subcommand to run. Without one, `now` runs.
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

/// Enumerates the supported subcommands.
/// Each variant maps to one module under `commands/`.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full provisioning pipeline (the default).
    /// Installs or upgrades every tool in order and prints a summary table.
    Now,
    /// Write a default configuration file.
    /// The file lists every key with its built-in value, ready to edit.
    Generate {
        /// Overwrite an existing configuration file.
        #[arg(long)]
        force: bool,
    },
    /// Print version information.
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_parses_to_none() {
        let cli = Cli::try_parse_from(["setup-workstation"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "setup-workstation",
            "generate",
            "--force",
            "--config",
            "/tmp/ws.yaml",
            "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.config.as_deref(), Some("/tmp/ws.yaml"));
        assert!(matches!(cli.command, Some(Commands::Generate { force: true })));
    }
}
