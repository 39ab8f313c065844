pub mod help;
pub mod install;
pub mod list;
pub mod new;
pub mod setup;
pub mod uninstall;

pub use help::HelpHandler;
pub use install::InstallHandler;
pub use list::ListHandler;
pub use new::NewHandler;
pub use setup::{BuildHandler, SetupHandler};
pub use uninstall::UninstallHandler;

use owo_colors::OwoColorize;

fn print_header(command: &str, argument: Option<&str>) {
    match argument {
        Some(argument) => println!(
            "{} {} {}",
            "felucca".bright_cyan().bold(),
            command.bright_white(),
            argument.bright_white()
        ),
        None => println!(
            "{} {}",
            "felucca".bright_cyan().bold(),
            command.bright_white()
        ),
    }
    println!();
}
