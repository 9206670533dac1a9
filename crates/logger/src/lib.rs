//! Logging infrastructure for tscat.
//!
//! Provides a simple, thread-safe logging system with file output,
//! in-memory log storage and optional echo to stderr. The same logger
//! backs the `log` facade once [`install`] has been called, so library
//! crates can keep using `log::info!` and friends.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Matching filter for the `log` facade
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Global logger state
#[derive(Debug)]
struct Logger {
    /// Recent log (last N messages)
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries in log
    max_entries: usize,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path
    file_path: Option<PathBuf>,
    /// Also print entries to stderr
    echo: bool,
}

impl Logger {
    /// Create new logger instance
    fn new(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        if let Some(path) = &file_path {
            // Create parent directory if it doesn't exist
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Clear log file on startup
            if let Ok(mut file) = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(file, "=== tscat log start ===");
            }
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            min_level,
            file_path,
            echo: false,
        }
    }

    /// Add entry to log
    fn add_entry(&mut self, level: LogLevel, message: String) {
        // Filter by minimum level
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        if self.echo {
            eprintln!("{}: {}", level.to_str().to_lowercase(), message);
        }

        // Write to file (create if deleted)
        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
            }
        }

        self.entries.push_back(LogEntry {
            timestamp,
            level,
            message,
        });

        // Limit queue size
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Get all log entries
    fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Run `f` against the logger if it has been initialized.
fn with_logger(f: impl FnOnce(&mut Logger)) {
    if let Some(logger) = LOGGER.get() {
        if let Ok(mut logger) = logger.lock() {
            f(&mut logger);
        }
    }
}

/// Initialize the global logger
///
/// Should be called once at application startup. Subsequent calls are
/// ignored; logging before initialization is a no-op.
///
/// # Arguments
///
/// * `file_path` - Path to the log file (`None` keeps logs in memory only)
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record (Debug, Info, Warn, Error)
pub fn init(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, max_entries, min_level)));
}

/// Route the `log` facade into this logger.
pub fn install(min_level: LogLevel) -> Result<(), log::SetLoggerError> {
    log::set_logger(&FACADE)?;
    log::set_max_level(min_level.to_filter());
    Ok(())
}

/// Set minimum log level dynamically
pub fn set_min_level(level: LogLevel) {
    with_logger(|logger| logger.min_level = level);
    log::set_max_level(level.to_filter());
}

/// Print entries to stderr as they are recorded
pub fn set_echo(echo: bool) {
    with_logger(|logger| logger.echo = echo);
}

/// Log a debug message
pub fn debug(message: impl Into<String>) {
    with_logger(|logger| logger.add_entry(LogLevel::Debug, message.into()));
}

/// Log an informational message
pub fn info(message: impl Into<String>) {
    with_logger(|logger| logger.add_entry(LogLevel::Info, message.into()));
}

/// Log a warning message
pub fn warn(message: impl Into<String>) {
    with_logger(|logger| logger.add_entry(LogLevel::Warn, message.into()));
}

/// Log an error message
pub fn error(message: impl Into<String>) {
    with_logger(|logger| logger.add_entry(LogLevel::Error, message.into()));
}

/// Get all log entries
///
/// Returns a vector of all log entries currently stored in memory.
pub fn get_entries() -> Vec<LogEntry> {
    LOGGER
        .get()
        .and_then(|logger| logger.lock().ok().map(|logger| logger.get_entries()))
        .unwrap_or_default()
}

/// Adapter between the `log` facade and the global logger.
struct Facade;

static FACADE: Facade = Facade;

impl log::Log for Facade {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("{}: {}", record.target(), record.args());
        with_logger(|logger| logger.add_entry(record.level().into(), message));
    }

    fn flush(&self) {}
}
