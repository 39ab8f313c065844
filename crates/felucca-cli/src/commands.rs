use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "felucca")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "A package manager for Cairo contracts", long_about = None)]
#[command(disable_help_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Installs a Cairo contracts package into the project
    #[command(aliases = ["i", "add"])]
    Install {
        /// Package name on the index, or owner/repo[@vX.Y.Z]
        package: String,
        /// Version to install (a vX.Y.Z tag for repositories)
        #[arg(id = "package_version", value_name = "VERSION")]
        version: Option<String>,
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
    /// Removes an installed contracts package
    #[command(aliases = ["rm", "remove"])]
    Uninstall {
        /// Name the package was installed under
        package: String,
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
    /// Prepares an existing Poetry project for felucca
    Setup {
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
    /// Creates a new Cairo project
    #[command(alias = "init")]
    New {
        /// Name of the project directory and package
        name: String,
        /// Project description
        #[arg(short = 'd', long)]
        description: Option<String>,
        /// Skips interactive prompts
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Builds the project distribution
    Build {
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
    /// Lists installed contracts packages
    #[command(alias = "ls")]
    List,
    /// Shows help information for felucca or a specific command
    Help {
        /// The command to show help for (optional)
        #[arg()]
        command: Option<String>,
    },
}
