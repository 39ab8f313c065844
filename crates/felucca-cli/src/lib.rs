pub mod commands;
pub mod handlers;

use clap::Parser;

use crate::commands::{Cli, Commands};
use crate::handlers::{
    BuildHandler, HelpHandler, InstallHandler, ListHandler, NewHandler, SetupHandler,
    UninstallHandler,
};
use felucca_error::FeluccaError;

/// Parses the command line, runs the command and returns the process exit
/// code.
pub fn run_cli() -> i32 {
    let cli = Cli::parse();
    felucca_logger::init_logger(cli.quiet);

    match dispatch(cli.command) {
        Ok(()) => 0,
        Err(e) => {
            felucca_logger::error(&format!("{e:#}"));
            e.downcast_ref::<FeluccaError>()
                .map_or(1, FeluccaError::exit_code)
        }
    }
}

fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Install {
            package,
            version,
            debug,
        } => InstallHandler::handle_install(&package, version.as_deref(), debug),
        Commands::Uninstall { package, debug } => {
            UninstallHandler::handle_uninstall(&package, debug)
        }
        Commands::Setup { debug } => SetupHandler::handle_setup(debug),
        Commands::New {
            name,
            description,
            yes,
        } => NewHandler::handle_new(&name, description, yes),
        Commands::Build { debug } => BuildHandler::handle_build(debug),
        Commands::List => ListHandler::handle_list(),
        Commands::Help { command } => HelpHandler::handle_help(command.as_deref()),
    }
}
