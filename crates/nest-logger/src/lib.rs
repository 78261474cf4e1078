use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

pub struct Logger {
    start_time: Instant,
    quiet: bool,
    verbose: bool,
    line_dirty: AtomicBool,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            start_time: Instant::now(),
            quiet,
            verbose,
            line_dirty: AtomicBool::new(false),
        }
    }

    /// Whether a message at `level` would be printed.
    #[must_use]
    pub const fn enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error => true,
            LogLevel::Debug => self.verbose && !self.quiet,
            _ => !self.quiet,
        }
    }

    fn clear_status_line(&self) {
        if !self.line_dirty.swap(false, Ordering::Relaxed) {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        self.clear_status_line();

        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "nest".bright_cyan().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Success => (
                "✓".bright_green().bold().to_string(),
                message.bright_green().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        if matches!(level, LogLevel::Error | LogLevel::Warning) {
            eprintln!("{prefix} {colored_message}");
        } else {
            println!("{prefix} {colored_message}");
        }
    }

    /// Transient single-line status, overwritten by the next message.
    /// Only drawn on an interactive terminal.
    pub fn status(&self, message: &str) {
        if self.quiet || !io::stdout().is_terminal() {
            return;
        }

        self.clear_status_line();
        print!("{} {}", "◦".bright_cyan(), message.bright_white());
        let _ = io::stdout().flush();
        self.line_dirty.store(true, Ordering::Relaxed);
    }

    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        let elapsed = self.start_time.elapsed();
        let time_str = if elapsed.as_millis() < 1000 {
            format!("{}ms", elapsed.as_millis())
        } else {
            format!("{:.2}s", elapsed.as_secs_f64())
        };

        self.clear_status_line();
        println!(
            "{} {} {}",
            "✓".bright_green().bold(),
            message.bright_green(),
            format!("[{time_str}]").bright_black()
        );
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

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(quiet: bool, verbose: bool) {
    let _ = LOGGER.set(Logger::new(quiet, verbose));
}

// Library code may log before the binary installs a logger (tests, embedding
// hosts); fall back to a quiet one.
fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(true, false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn success(message: &str) {
    get_logger().success(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn debug(message: &str) {
    get_logger().debug(message);
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}
