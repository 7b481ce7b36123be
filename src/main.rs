#[macro_use] extern crate log;

pub mod api;
pub mod config;
pub mod context;
pub mod handlers;
pub mod logger;
pub mod server;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::config::{Config, DEFAULT_LOG_FILE, DEFAULT_PORT};
use crate::context::Context;
use crate::logger::get_reporter;
use crate::utils::{Clock, ResultV};


const MODULE: &str = "MAIN";

const SIGNAL_ERROR: &str = "could not watch for interrupt";

/// Simple HTTP server answering GET with its status and validating JSON sent by POST
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log: PathBuf,
}


fn main() -> ResultV {
    let args = Args::parse();
    let cfg = Config::new(args.port, args.log);

    // Must run before any thread exists.
    let clock = Clock::local();

    logger::init_logger(&cfg, clock)?;

    let server = Arc::new(server::bind(&cfg)?);
    let watcher = server::watch_interrupt(server.clone())
        .map_err(get_reporter(MODULE, "Signal", SIGNAL_ERROR))?;

    let ctx = Context::new(log::logger(), clock);
    server::run(server, watcher, &ctx, cfg.port);

    Ok(())
}
