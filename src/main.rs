// Entry point for `setup-workstation`.
// Parses the command line, switches on debug logging when asked, and hands
// off to the matching module under `commands/`. Any error that reaches this
// level is logged with its full context chain and ends the process with
// exit status 1.

mod cli;
mod commands;
mod errors;
mod installers;
mod libs;
mod logger;
mod schemas;

use clap::Parser;
use cli::cmd_enums::{Cli, Commands};
use commands::{generate, now, version};

fn main() {
    let cli = Cli::parse();
    // Must happen before any command runs so `log_debug!` sees the flag.
    logger::init(cli.debug);

    // No subcommand means a provisioning run.
    let result = match cli.command.unwrap_or(Commands::Now) {
        Commands::Now => now::run(cli.config),
        Commands::Generate { force } => generate::run(cli.config, force),
        Commands::Version => {
            version::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        crate::log_error!("{:#}", e);
        std::process::exit(1);
    }
}
