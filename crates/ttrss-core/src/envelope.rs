//! Decoded API response and its error classification.
//!
//! Wire shape: `{"seq": int|null, "status": int, "content": {...}}`. A string
//! `content.error` signals an application error regardless of `status`.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ClientError;

/// Error text used when the server reports a failure without saying why.
pub const NO_ERROR_TEXT: &str = "(response contained no error text)";

/// Status field of an API response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiStatus {
    Ok,
    Error,
}

impl ApiStatus {
    /// Wire value for success.
    pub const OK: i64 = 0;
    /// Wire value for failure.
    pub const ERR: i64 = 1;

    /// Any non-zero wire status is treated as an error.
    pub fn from_wire(raw: i64) -> Self {
        if raw == Self::OK {
            Self::Ok
        } else {
            Self::Error
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Error => f.write_str("error"),
        }
    }
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    seq: Option<i64>,
    status: i64,
    #[serde(default)]
    content: Value,
}

/// One classified API response.
///
/// Built once per call and never mutated. `error` is always `Some` when the
/// status is [`ApiStatus::Error`].
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    sequence: Option<i64>,
    status: ApiStatus,
    raw_status: i64,
    error: Option<String>,
    content: Map<String, Value>,
}

impl Envelope {
    /// Classify an already-decoded response.
    pub fn new(sequence: Option<i64>, raw_status: i64, content: Map<String, Value>) -> Self {
        let status = ApiStatus::from_wire(raw_status);
        let mut error = content
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);
        if status == ApiStatus::Error && error.is_none() {
            debug!(raw_status, "error status without error text");
            error = Some(NO_ERROR_TEXT.to_string());
        }
        Self {
            sequence,
            status,
            raw_status,
            error,
            content,
        }
    }

    /// Decode and classify a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ClientError> {
        let wire: WireResponse = serde_json::from_slice(body)?;
        let content = match wire.content {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ClientError::Decode(format!(
                    "content is not a JSON object: {other}"
                )))
            }
        };
        Ok(Self::new(wire.seq, wire.status, content))
    }

    pub fn sequence(&self) -> Option<i64> {
        self.sequence
    }

    pub fn status(&self) -> ApiStatus {
        self.status
    }

    /// Status integer exactly as the server sent it.
    pub fn raw_status(&self) -> i64 {
        self.raw_status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.status == ApiStatus::Ok
    }

    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    pub fn into_content(self) -> Map<String, Value> {
        self.content
    }
}
