use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use felucca_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, REPOSITORY_URL, VERSION};

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(cmd) => Self::show_command_help(cmd),
            None => {
                Self::show_custom_help();
                Ok(())
            }
        }
    }

    fn show_command_help(command: &str) -> Result<()> {
        let mut cmd = Cli::command();

        if let Some(subcommand) = cmd.find_subcommand_mut(command) {
            subcommand.print_help()?;
        } else {
            println!(
                "{}: Unknown command '{}'",
                "Error".bright_red().bold(),
                command
            );
            println!();
            Self::show_custom_help();
        }

        println!();
        Ok(())
    }

    fn alias_suffix(aliases: &[&str]) -> String {
        if aliases.is_empty() {
            String::new()
        } else {
            format!(" [{}]", aliases.join(", "))
        }
    }

    fn section(title: &str) {
        println!("{}", title.bright_magenta().bold());
    }

    /// One `  <entry>  # <description>` row. `plain_len` is the width of
    /// `colored` without escape codes, so columns line up.
    fn print_row(colored: &str, plain_len: usize, description: &str, width: usize) {
        println!(
            "  {:width$}  # {}",
            colored,
            description.bright_black().bold(),
            width = width + (colored.len() - plain_len)
        );
    }

    fn show_custom_help() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        Self::section("Usage:");
        println!(
            "  {} {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "<COMMAND>".bright_white(),
            "[OPTIONS]".bright_black().bold(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        let rows: Vec<(String, String, &str)> = COMMANDS
            .iter()
            .map(|(cmd, desc, aliases)| {
                let suffix = Self::alias_suffix(aliases);
                let colored = format!("{}{}", cmd.bright_cyan().bold(), suffix.bright_black().bold());
                (colored, format!("{cmd}{suffix}"), *desc)
            })
            .collect();
        let width = rows.iter().map(|(_, plain, _)| plain.len()).max().unwrap_or(0);

        Self::section("Commands:");
        for (colored, plain, desc) in &rows {
            Self::print_row(colored, plain.len(), desc, width);
        }
        println!();

        Self::section("Options:");
        for (flag, desc) in [
            ("-q, --quiet", "Only print warnings and errors"),
            ("--debug", "Print every step and external command"),
            ("-V, --version", "Print version"),
        ] {
            Self::print_row(&flag.bright_cyan().bold().to_string(), flag.len(), desc, width);
        }
        println!();

        Self::show_examples();
    }

    fn format_example(cmd: &str) -> String {
        let mut parts = cmd.split_whitespace();
        let Some(program) = parts.next() else {
            return String::new();
        };

        std::iter::once(program.bright_cyan().bold().to_string())
            .chain(parts.map(|part| {
                if part.starts_with('-') {
                    part.bright_black().bold().to_string()
                } else {
                    part.bright_white().to_string()
                }
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn show_examples() {
        let help_cmd = format!("{BIN_NAME} help <command>");
        let width = EXAMPLES
            .iter()
            .map(|(cmd, _)| cmd.len())
            .chain(std::iter::once(help_cmd.len()))
            .max()
            .unwrap_or(0);

        Self::section("Examples:");
        for (cmd, desc) in EXAMPLES {
            Self::print_row(&Self::format_example(cmd), cmd.len(), desc, width);
        }
        println!();

        println!(
            "{}",
            "For more information about a specific command, use:".bright_magenta()
        );
        Self::print_row(
            &Self::format_example(&help_cmd),
            help_cmd.len(),
            "Show help for specific command",
            width,
        );
        println!();
        println!(
            "Visit {} for more information",
            REPOSITORY_URL.bright_cyan().underline()
        );
    }
}
