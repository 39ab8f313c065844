pub mod command;
pub mod git;
pub mod poetry;

pub use command::{CommandOutput, run_command, run_command_capture};
pub use git::{Git, RepositoryFetcher};
pub use poetry::{DependencyTool, Poetry};
