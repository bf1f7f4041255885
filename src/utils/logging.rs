// Logging utilities
// Author: Gabriel Demetrios Lafis

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Parse a level name such as `warn` or `DEBUG`
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Install the stderr logger.
///
/// Stdout is reserved for command output (previews, reports) so that it
/// can be piped.
pub fn init_logging(level: LevelFilter, color: bool) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger { level, color }))
        .map(|()| log::set_max_level(level))
}

struct StderrLogger {
    level: LevelFilter,
    color: bool,
}

impl StderrLogger {
    fn label(&self, level: Level) -> &'static str {
        match (level, self.color) {
            (Level::Error, true) => "\x1B[31mERROR\x1B[0m",
            (Level::Warn, true) => "\x1B[33mWARN\x1B[0m",
            (Level::Info, true) => "\x1B[32mINFO\x1B[0m",
            (Level::Debug, true) => "\x1B[34mDEBUG\x1B[0m",
            (Level::Trace, true) => "\x1B[90mTRACE\x1B[0m",
            (Level::Error, false) => "ERROR",
            (Level::Warn, false) => "WARN",
            (Level::Info, false) => "INFO",
            (Level::Debug, false) => "DEBUG",
            (Level::Trace, false) => "TRACE",
        }
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let label = self.label(record.level());

        // Module path only at debug and below
        if record.level() >= Level::Debug {
            eprintln!("[{}] {} {}: {}", timestamp, label, record.target(), record.args());
        } else {
            eprintln!("[{}] {}: {}", timestamp, label, record.args());
        }
    }

    fn flush(&self) {}
}
