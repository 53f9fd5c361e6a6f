//! The RPC channel: one request in, one classified [`Envelope`] out.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::debug;
use ttrss_core::{ClientError, Envelope};
use ttrss_settings::ConnInfo;

use crate::session::normalize_endpoint;
use crate::transport::{HttpTransport, Transport};

/// Endpoint and authentication state of a channel.
#[derive(Clone, Default)]
pub struct Session {
    endpoint: String,
    token: Option<SecretString>,
}

impl Session {
    /// Unauthenticated session against `endpoint`.
    pub fn anonymous(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub(crate) fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Blocking JSON-RPC channel to one API endpoint.
///
/// Calls take `&self`; only [`RpcChannel::login`] mutates the session.
pub struct RpcChannel<T: Transport = HttpTransport> {
    transport: T,
    session: Session,
}

impl RpcChannel<HttpTransport> {
    /// HTTP channel for `conn.host_url`, honoring its timeout.
    pub fn http(conn: &ConnInfo) -> Result<Self, ClientError> {
        let timeout = conn.timeout_secs.map(std::time::Duration::from_secs);
        let transport = HttpTransport::with_timeout(timeout)?;
        Ok(Self::new(transport, &conn.host_url))
    }
}

impl<T: Transport> RpcChannel<T> {
    /// Unauthenticated channel; `host_url` is normalized to its API endpoint.
    pub fn new(transport: T, host_url: &str) -> Self {
        Self {
            transport,
            session: Session::anonymous(normalize_endpoint(host_url)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn endpoint(&self) -> &str {
        self.session.endpoint()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Issue `op` with `params` and classify the response.
    ///
    /// Application errors come back inside the [`Envelope`]; only transport,
    /// encoding and decoding failures are returned as `Err`.
    pub fn call(&self, op: &str, mut params: Map<String, Value>) -> Result<Envelope, ClientError> {
        let _ = params.insert("op".into(), Value::String(op.to_string()));
        if let Some(token) = self.session.token() {
            let _ = params.insert("sid".into(), Value::String(token.expose_secret().to_string()));
        }

        let body = serde_json::to_vec(&Value::Object(params))
            .map_err(|e| ClientError::Encode(e.to_string()))?;

        debug!(op, endpoint = %self.session.endpoint, authenticated = self.session.is_authenticated(), "api call");
        let raw = self.transport.post_json(&self.session.endpoint, body)?;
        let envelope = Envelope::from_slice(&raw)?;
        debug!(op, status = %envelope.status(), raw_status = envelope.raw_status(), "api call finished");
        Ok(envelope)
    }
}

impl<T: Transport> std::fmt::Debug for RpcChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChannel")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
