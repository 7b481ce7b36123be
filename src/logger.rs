use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record};
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode};

use crate::config::Config;
use crate::utils::{Clock, ErrorStr, Result, ResultV};


pub const OPEN_LOG_ERROR: &str = "could not open log file";
pub const INIT_LOG_ERROR: &str = "could not install logger";


/// Append-only sink writing `<time> - <LEVEL> - <message>` lines.
///
/// Clones share the same file handle.
#[derive(Clone)]
pub struct FileLogger {
    level: LevelFilter,
    clock: Clock,
    file: Arc<Mutex<File>>,
}

impl FileLogger {
    pub fn open(path: &Path, clock: Clock) -> io::Result<FileLogger> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileLogger::from_file(file, clock))
    }

    pub fn from_file(file: File, clock: Clock) -> FileLogger {
        FileLogger { level: LevelFilter::Info, clock, file: Arc::new(Mutex::new(file)) }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} - {} - {}\n", self.clock.log_stamp(), level_name(record.level()), record.args());

        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            eprintln!("Failed to write log line: {}", e);
        }
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.flush().ok();
    }
}

impl SharedLogger for FileLogger {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn  => "WARNING",
        Level::Info  => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}


/// Builds the process logging pipeline: the log file plus a stderr echo for
/// warnings and errors.
pub fn build_logger(cfg: &Config, clock: Clock) -> Result<Box<CombinedLogger>> {
    let file_logger = FileLogger::open(&cfg.log_file, clock).map_err(|e| {
        eprintln!("Could not open log file {}: {}", cfg.log_file.display(), e);
        OPEN_LOG_ERROR
    })?;

    Ok(CombinedLogger::new(vec![
        TermLogger::new(LevelFilter::Warn, prepare_logger_config(), TerminalMode::Stderr, ColorChoice::Auto),
        Box::new(file_logger),
    ]))
}

/// Installs the pipeline from `build_logger` as the process logger. Handlers
/// reach it through `log::logger()`.
pub fn init_logger(cfg: &Config, clock: Clock) -> ResultV {
    let combined = build_logger(cfg, clock)?;
    log::set_boxed_logger(combined).map_err(|e| {
        eprintln!("Could not install logger: {}", e);
        INIT_LOG_ERROR
    })?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

fn prepare_logger_config() -> simplelog::Config {
    simplelog::ConfigBuilder::new().set_time_format_custom(
        simplelog::format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
        )
    ).set_time_offset_to_local().unwrap_or_else(|builder| builder).build()
}

/// Builds a `map_err` adapter that logs the cause and yields `err`.
pub fn get_reporter<E: Display>(module: &'static str, what: &'static str, err: ErrorStr) -> impl Fn(E) -> ErrorStr {
    move |e| {
        error!("[{}] {} error: {}", module, what, e);
        err
    }
}
