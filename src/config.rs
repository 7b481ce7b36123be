use std::path::PathBuf;


pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILE: &str = "/var/log/http_server.log";

const BIND_HOST: &str = "0.0.0.0";


/// Startup settings, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_file: PathBuf,
}

impl Config {
    pub fn new(port: u16, log_file: impl Into<PathBuf>) -> Config {
        Config { port, log_file: log_file.into() }
    }

    pub fn bind_address(&self) -> (&'static str, u16) {
        (BIND_HOST, self.port)
    }
}
