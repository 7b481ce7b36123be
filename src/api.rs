use serde_derive::{Deserialize, Serialize};


pub const SERVER_RUNNING: &str = "Server is running";
pub const DATA_RECEIVED: &str = "Data received successfully";
pub const INVALID_JSON: &str = "Invalid JSON data";
pub const LENGTH_REQUIRED: &str = "Content-Length required";
pub const INVALID_LENGTH: &str = "Invalid Content-Length";
pub const BODY_UNREADABLE: &str = "Could not read request body";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";


/// Body of every GET reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusReply {
    pub message: String,
    pub time: String,
}

/// Body of POST replies and of every error reply.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReply {
    pub status: String,
    pub message: String,
}

impl StatusReply {
    pub fn running(time: String) -> StatusReply {
        StatusReply { message: SERVER_RUNNING.to_string(), time }
    }
}

impl OutcomeReply {
    pub fn success(message: &str) -> OutcomeReply {
        OutcomeReply { status: STATUS_SUCCESS.to_string(), message: message.to_string() }
    }

    pub fn error(message: impl Into<String>) -> OutcomeReply {
        OutcomeReply { status: STATUS_ERROR.to_string(), message: message.into() }
    }
}
