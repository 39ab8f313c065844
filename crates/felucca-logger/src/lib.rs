use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

/// Terminal output for one command run. Status lines are rewritten in
/// place when stdout is a terminal.
pub struct Logger {
    started: Instant,
    quiet: bool,
    interactive: bool,
    pending: Arc<Mutex<bool>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
    Shell,
}

impl LogLevel {
    const fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    fn marker(self) -> String {
        match self {
            Self::Info => "felucca".bright_cyan().bold().to_string(),
            Self::Success => "✓".bright_green().bold().to_string(),
            Self::Warning => "⚠".bright_yellow().bold().to_string(),
            Self::Error => "✗".bright_red().bold().to_string(),
            Self::Debug => "•".bright_black().bold().to_string(),
            Self::Shell => "$".bright_blue().bold().to_string(),
        }
    }

    fn paint(self, message: &str) -> String {
        match self {
            Self::Info => message.white().to_string(),
            Self::Success => message.bright_green().to_string(),
            Self::Warning => message.bright_yellow().to_string(),
            Self::Error => message.bright_red().to_string(),
            Self::Debug | Self::Shell => message.bright_black().to_string(),
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            started: Instant::now(),
            quiet,
            interactive: io::stdout().is_terminal(),
            pending: Arc::new(Mutex::new(false)),
        }
    }

    const fn suppressed(&self, level: LogLevel) -> bool {
        self.quiet && !level.to_stderr()
    }

    fn set_pending(&self, value: bool) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = value;
        }
    }

    fn erase_pending(&self) {
        if !self.interactive || !self.pending.lock().is_ok_and(|p| *p) {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout
            .execute(cursor::MoveToColumn(0))
            .and_then(|out| out.execute(terminal::Clear(terminal::ClearType::CurrentLine)));
        let _ = stdout.flush();
        self.set_pending(false);
    }

    /// Replaces the pending status line with `message`. Off a terminal the
    /// message is printed as its own line.
    pub fn update_line(&self, message: &str) {
        if self.quiet {
            return;
        }
        if !self.interactive {
            println!("{message}");
            return;
        }

        self.erase_pending();
        print!("{message}");
        let _ = io::stdout().flush();
        self.set_pending(true);
    }

    pub fn finish_line(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.erase_pending();
        println!("{message}");
    }

    #[must_use]
    pub fn format(level: LogLevel, message: &str) -> String {
        format!("{} {}", level.marker(), level.paint(message))
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.suppressed(level) {
            return;
        }

        self.erase_pending();
        let line = Self::format(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Closing line of a command, with the time since the logger started.
    pub fn finish(&self, message: &str) {
        let line = format!(
            "{} {}",
            Self::format(LogLevel::Success, message),
            format!("[{}]", format_elapsed(self.started.elapsed())).bright_black()
        );
        self.finish_line(&line);
    }

    pub fn status(&self, message: &str) {
        self.update_line(&format!("{} {}", "◦".bright_cyan(), message.bright_white()));
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str, enabled: bool) {
        if enabled {
            self.log(LogLevel::Debug, message);
        }
    }

    /// Echo of an external command before it runs.
    pub fn shell(&self, command: &str) {
        self.log(LogLevel::Shell, command);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

// Library code may log before the binary sets the logger up (tests, embedding);
// those calls are dropped instead of panicking.
fn with_logger(f: impl FnOnce(&Logger)) {
    if let Some(logger) = LOGGER.get() {
        f(logger);
    }
}

pub fn update_line(message: &str) {
    with_logger(|l| l.update_line(message));
}

pub fn status(message: &str) {
    with_logger(|l| l.status(message));
}

pub fn info(message: &str) {
    with_logger(|l| l.info(message));
}

pub fn success(message: &str) {
    with_logger(|l| l.success(message));
}

pub fn warn(message: &str) {
    with_logger(|l| l.warn(message));
}

pub fn error(message: &str) {
    with_logger(|l| l.error(message));
}

pub fn debug(message: &str, debug_enabled: bool) {
    with_logger(|l| l.debug(message, debug_enabled));
}

pub fn shell(command: &str) {
    with_logger(|l| l.shell(command));
}

pub fn finish(message: &str) {
    with_logger(|l| l.finish(message));
}

pub fn finish_line(message: &str) {
    with_logger(|l| l.finish_line(message));
}
