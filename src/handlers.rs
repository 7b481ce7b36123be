use std::io;

use serde::Serialize;
use tiny_http::{Header, Request, Response, StatusCode};

use crate::api::{OutcomeReply, StatusReply, DATA_RECEIVED, INVALID_JSON};
use crate::context::Context;


pub const HTTP_200: u16 = 200;
pub const HTTP_400: u16 = 400;
pub const HTTP_411: u16 = 411;
pub const HTTP_501: u16 = 501;

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";


/// Outcome of one exchange, ready to be written back.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: &impl Serialize) -> Reply {
        // Reply bodies are plain string structs; serializing them cannot fail.
        let body = serde_json::to_string(body).unwrap_or_else(|_| String::from("{}"));
        Reply { status, body }
    }
}


pub fn handle_get(ctx: &Context, path: &str) -> Reply {
    ctx.info(format_args!("GET request received at {}", path));
    Reply::json(HTTP_200, &StatusReply::running(ctx.clock.response_stamp()))
}

pub fn handle_post(ctx: &Context, path: &str, body: &[u8]) -> Reply {
    ctx.info(format_args!("POST request received at {}", path));
    ctx.info(format_args!("POST data: {}", String::from_utf8_lossy(body)));

    // Any JSON value is accepted; the payload itself is not kept.
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(_) => Reply::json(HTTP_200, &OutcomeReply::success(DATA_RECEIVED)),
        Err(_) => Reply::json(HTTP_400, &OutcomeReply::error(INVALID_JSON)),
    }
}

pub fn handle_unsupported(ctx: &Context, method: &str, path: &str) -> Reply {
    ctx.warn(format_args!("Unsupported method {} at {}", method, path));
    Reply::json(HTTP_501, &OutcomeReply::error(format!("Unsupported method ('{}')", method)))
}

pub fn handle_rejected_post(ctx: &Context, path: &str, status: u16, message: &str) -> Reply {
    ctx.error(format_args!("POST request at {} rejected: {}", path, message));
    Reply::json(status, &OutcomeReply::error(message))
}


pub fn respond(r: Request, reply: Reply) -> io::Result<()> {
    let header = Header::from_bytes(CONTENT_TYPE, APPLICATION_JSON)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid response header"))?;

    let response = Response::from_data(reply.body.into_bytes())
        .with_status_code(StatusCode(reply.status))
        .with_header(header);

    r.respond(response)
}
