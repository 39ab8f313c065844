use std::path::Path;
use std::process::{Command, Stdio};

use felucca_error::{FeluccaError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_error(command: String, err: &std::io::Error, debug: bool) -> FeluccaError {
    felucca_logger::debug(&format!("could not start `{command}`: {err}"), debug);
    FeluccaError::ExternalTool {
        command,
        code: None,
    }
}

/// Runs an external command with inherited stdio. A non-zero exit becomes
/// `ExternalTool`.
pub fn run_command(program: &str, args: &[&str], cwd: &Path, debug: bool) -> Result<()> {
    let rendered = render(program, args);
    felucca_logger::shell(&rendered);

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| spawn_error(rendered.clone(), &e, debug))?;

    if status.success() {
        Ok(())
    } else {
        Err(FeluccaError::ExternalTool {
            command: rendered,
            code: status.code(),
        })
    }
}

/// Runs an external command and captures its output. The exit status is
/// returned to the caller rather than mapped to an error.
pub fn run_command_capture(
    program: &str,
    args: &[&str],
    cwd: &Path,
    debug: bool,
) -> Result<CommandOutput> {
    let rendered = render(program, args);
    felucca_logger::debug(&format!("$ {rendered}"), debug);

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(rendered, &e, debug))?;

    Ok(CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
