//! Error hierarchy shared by every client operation.
//!
//! Application-level errors reported inside a well-formed response are *not*
//! represented here: they travel as data on [`Envelope`](crate::Envelope).
//! These variants cover the cases where an operation cannot produce a result.

use crate::subscribe::SubscriptionOutcome;

/// Typed error for channel calls, login, and response decoding.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport could not complete the exchange (refused, timeout, TLS).
    #[error("connection error: {0}")]
    Connection(String),

    /// The request parameters could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The response body was not a well-formed envelope.
    #[error("API JSON response was malformed: {0} - are you sure you supplied the correct URL?")]
    Decode(String),

    /// The server refused to open a session.
    #[error("failed to log in at {endpoint} as {user}{}", detail_suffix(.detail))]
    Auth {
        /// Endpoint the login was attempted against.
        endpoint: String,
        /// Username that was rejected.
        user: String,
        /// Envelope error text, if the server gave any.
        detail: Option<String>,
    },

    /// A response was well-formed JSON but violated an operation's shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An operation received an application error in the envelope.
    #[error("API error: {0}")]
    Api(String),

    /// A subscribe attempt finished without a subscription.
    #[error("subscription failed: {0}")]
    Subscribe(SubscriptionOutcome),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl ClientError {
    /// Shorthand for a [`ClientError::Protocol`] with a formatted message.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Encode(_) => "encode",
            Self::Decode(_) => "decode",
            Self::Auth { .. } => "auth",
            Self::Protocol(_) => "protocol",
            Self::Api(_) => "api",
            Self::Subscribe(_) => "subscribe",
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
