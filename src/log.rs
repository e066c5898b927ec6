//! Console and file logging
//!
//! Nothing is written until `init` has been called. Console output is only
//! produced in debug mode.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use chrono::Local;

use crate::shared::FrameworkConfig;

static LOGGER: Mutex<Option<LogSink>> = Mutex::new(None);

/// Severity tag printed in front of every line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Warning,
    Error,
    Validation,
    Bench,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Validation => "Valid",
            LogLevel::Bench => "Bench",
        }
    }
}

struct LogSink {
    console: bool,
    file: Option<File>,
}

/// Initialize logging from the framework configuration
pub fn init(config: &FrameworkConfig) {
    let file = config.log_file.as_ref().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
    });

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(LogSink {
            console: config.debug,
            file,
        });
    }

    log(LogLevel::Info, "=== winframe log started ===");
}

/// Format one log line
pub fn format_line(level: LogLevel, msg: &str) -> String {
    format!(
        "[{}][{}]: {}",
        Local::now().format("%d.%m. %H:%M:%S"),
        level.tag(),
        msg
    )
}

/// Log a message at the given level
pub fn log(level: LogLevel, msg: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut sink) = *guard {
            let line = format_line(level, msg);
            if sink.console {
                eprintln!("{}", line);
            }
            if let Some(ref mut file) = sink.file {
                let _ = writeln!(file, "{}", line);
                let _ = file.flush();
            }
        }
    }
}

/// Log a formatted message at info level
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log($crate::log::LogLevel::Info, &format!($($arg)*))
    };
}

/// Log a formatted message at an explicit level
#[macro_export]
macro_rules! log_at {
    ($level:ident, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogLevel::$level, &format!($($arg)*))
    };
}
