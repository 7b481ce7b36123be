use std::fmt;

use log::{Level, Log, Record};

use crate::utils::Clock;


/// What a handler needs from the process: where to log and what time it is.
pub struct Context<'a> {
    pub log: &'a dyn Log,
    pub clock: Clock,
}

impl<'a> Context<'a> {
    pub fn new(log: &'a dyn Log, clock: Clock) -> Context<'a> {
        Context { log, clock }
    }

    pub fn info(&self, args: fmt::Arguments) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments) {
        self.emit(Level::Warn, args);
    }

    pub fn error(&self, args: fmt::Arguments) {
        self.emit(Level::Error, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments) {
        self.log.log(
            &Record::builder()
                .level(level)
                .target(module_path!())
                .args(args)
                .build()
        );
    }
}
