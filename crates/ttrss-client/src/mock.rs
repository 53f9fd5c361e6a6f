//! Scripted [`Transport`] for deterministic tests without a server.

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::transport::{Transport, TransportError};

/// Pre-programmed reply for one request.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Respond with this JSON body.
    Json(Value),
    /// Respond with these bytes verbatim.
    Raw(Vec<u8>),
    /// Fail at the transport level.
    Fail(String),
}

impl MockReply {
    /// Successful envelope wrapping `content`.
    pub fn ok(content: Value) -> Self {
        Self::Json(json!({"seq": 0, "status": 0, "content": content}))
    }

    /// Error envelope with `error` as its error text.
    pub fn error(error: &str) -> Self {
        Self::Json(json!({"seq": 0, "status": 1, "content": {"error": error}}))
    }
}

/// One request seen by a [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub url: String,
    /// Request body parsed as JSON (`Value::Null` if it was not JSON).
    pub body: Value,
}

/// Transport that returns replies in order and records every request.
pub struct MockTransport {
    replies: Mutex<std::collections::VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Transport for MockTransport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let idx = {
            let mut requests = self.requests.lock();
            requests.push(RecordedRequest {
                url: url.to_string(),
                body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            });
            requests.len() - 1
        };
        match self.replies.lock().pop_front() {
            Some(MockReply::Json(value)) => Ok(value.to_string().into_bytes()),
            Some(MockReply::Raw(bytes)) => Ok(bytes),
            Some(MockReply::Fail(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Other(format!(
                "MockTransport: no reply configured for call {idx}"
            ))),
        }
    }
}
