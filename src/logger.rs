//! Custom logging module.
//!
//! This module provides a `log` implementation that formats each record with
//! a timestamp and writes it to stderr, so the page snapshot on stdout stays
//! clean. Tests can swap the output for a callback.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that formats records and hands them to a callback.
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    /// Test hook: route formatted lines to `callback` instead of stderr.
    #[cfg(test)]
    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let formatted = format_log(record);
        match self.log_callback.lock() {
            Ok(callback) => match *callback {
                Some(ref cb) => cb(formatted),
                None => eprintln!("{}", formatted),
            },
            Err(_) => eprintln!("{}", formatted),
        }
    }

    fn flush(&self) {
        // No-op
    }
}

/// Install the logger globally at the given level.
///
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    log::set_boxed_logger(Box::new(CustomLogger::new(level)))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
