//! Module containing logger implementation.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{
    fmt::Arguments,
    io::{self, Write},
};

/// The main logger implementation for the `log` facade crate. Records are
/// written to the host's standard error.
pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), record.args());
        // NOTE: There is nowhere left to report a failed write to stderr.
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Initialize logging.
///
/// The library may be loaded more than once into the same VM, so only the
/// first call installs the logger.
pub fn init() {
    static LOGGER: Logger = Logger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

fn format_line(level: Level, args: &Arguments) -> String {
    format!("sass_nif [{}] {}", label(level), args)
}

fn label(level: Level) -> &'static str {
    match level {
        Level::Error => ERROR,
        Level::Warn => WARNING,
        Level::Info => INFO,
        Level::Debug | Level::Trace => DEBUG,
    }
}

const ERROR: &str = "error";
const WARNING: &str = "warning";
const INFO: &str = "info";
const DEBUG: &str = "debug";
