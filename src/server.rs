use std::io::{self, Read};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tiny_http::{Method, Request, Server};

use crate::api::{BODY_UNREADABLE, INVALID_LENGTH, LENGTH_REQUIRED};
use crate::config::Config;
use crate::context::Context;
use crate::handlers::{
    handle_get, handle_post, handle_rejected_post, handle_unsupported, respond, Reply, HTTP_400, HTTP_411,
};
use crate::logger::get_reporter;
use crate::utils::Result;


const MODULE: &str = "SERVER";

pub const BIND_ERROR: &str = "could not start server";

// Content-Length is client-supplied; never preallocate more than this.
const BODY_PREALLOC_LIMIT: usize = 64 * 1024;


enum BodyError {
    MissingLength,
    InvalidLength,
    Read(io::Error),
}


pub fn bind(cfg: &Config) -> Result<Server> {
    Server::http(cfg.bind_address()).map_err(get_reporter(MODULE, "Bind", BIND_ERROR))
}

/// Logs the start line, serves until `watcher` unblocks the server, then
/// closes the listening socket and logs the stop line.
pub fn run(server: Arc<Server>, watcher: JoinHandle<()>, ctx: &Context, port: u16) {
    ctx.info(format_args!("Starting HTTP server on port {}...", port));
    println!("Server started on port {}. Press Ctrl+C to stop.", port);

    serve(&server, ctx);

    // serve() only returns once the watcher has unblocked the server.
    watcher.join().ok();
    drop(server);

    ctx.info(format_args!("HTTP server stopped"));
}

/// Serves requests one at a time on the calling thread until the server is
/// unblocked.
pub fn serve(server: &Server, ctx: &Context) {
    for r in server.incoming_requests() {
        if let Err(e) = handle_request(r, ctx) {
            ctx.error(format_args!("Failed to send response: {}", e));
        }
    }
}

fn handle_request(mut r: Request, ctx: &Context) -> io::Result<()> {
    let path = r.url().to_string();
    let method = r.method().clone();

    let reply = match method {
        Method::Get => handle_get(ctx, &path),
        Method::Post => match read_body(&mut r) {
            Ok(body) => handle_post(ctx, &path, &body),
            Err(e) => reject_body(ctx, &path, e),
        },
        other => handle_unsupported(ctx, &other.to_string(), &path),
    };

    respond(r, reply)
}

fn read_body(r: &mut Request) -> std::result::Result<Vec<u8>, BodyError> {
    let length = content_length(r)?;
    let mut body = Vec::with_capacity(length.min(BODY_PREALLOC_LIMIT));
    Read::take(r.as_reader(), length as u64)
        .read_to_end(&mut body)
        .map_err(BodyError::Read)?;
    Ok(body)
}

fn content_length(r: &Request) -> std::result::Result<usize, BodyError> {
    let header = r.headers().iter()
        .find(|h| h.field.equiv("Content-Length"))
        .ok_or(BodyError::MissingLength)?;
    header.value.as_str().trim().parse::<usize>().map_err(|_| BodyError::InvalidLength)
}

fn reject_body(ctx: &Context, path: &str, e: BodyError) -> Reply {
    match e {
        BodyError::MissingLength => handle_rejected_post(ctx, path, HTTP_411, LENGTH_REQUIRED),
        BodyError::InvalidLength => handle_rejected_post(ctx, path, HTTP_400, INVALID_LENGTH),
        BodyError::Read(e) => {
            ctx.error(format_args!("Failed to read request data: {}", e));
            handle_rejected_post(ctx, path, HTTP_400, BODY_UNREADABLE)
        }
    }
}


/// Unblocks `server` once the process receives an interrupt. The serving
/// loop notices between requests, never in the middle of one.
///
/// The handler is registered before this returns, so an interrupt arriving
/// right after startup is never left to the default action.
#[cfg(unix)]
pub fn watch_interrupt(server: Arc<Server>) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let mut interrupt = {
        let _guard = runtime.enter();
        signal(SignalKind::interrupt())?
    };

    thread::Builder::new().name("interrupt".to_string()).spawn(move || {
        if runtime.block_on(interrupt.recv()).is_some() {
            server.unblock();
        }
    })
}

/// Windows fallback: only Ctrl+C, registered on the watcher's first poll.
#[cfg(not(unix))]
pub fn watch_interrupt(server: Arc<Server>) -> io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    thread::Builder::new().name("interrupt".to_string()).spawn(move || {
        match runtime.block_on(tokio::signal::ctrl_c()) {
            Ok(()) => server.unblock(),
            Err(e) => error!("[{}] Could not listen for interrupt: {}", MODULE, e),
        }
    })
}
