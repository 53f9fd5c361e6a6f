//! Session negotiation: exchange credentials for a `sid` token.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use ttrss_core::ClientError;
use ttrss_settings::ConnInfo;

use crate::channel::{RpcChannel, Session};
use crate::transport::Transport;

const API_SUFFIX: &str = "api/";

/// API endpoint for a server base URL.
///
/// Appends `/api/` unless the URL already ends in `/api/` or `/api`, so the
/// suffix appears exactly once.
pub fn normalize_endpoint(host_url: &str) -> String {
    let url = host_url.trim();
    if url.ends_with("/api/") {
        return url.to_string();
    }
    if url.ends_with("/api") {
        return format!("{url}/");
    }
    let mut endpoint = url.to_string();
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    endpoint.push_str(API_SUFFIX);
    endpoint
}

impl<T: Transport> RpcChannel<T> {
    /// Log in with `conn` and install the returned session token.
    ///
    /// Re-targets the channel at `conn.host_url` and drops any previous
    /// token before sending, so a failed login leaves it unauthenticated.
    pub fn login(&mut self, conn: &ConnInfo) -> Result<bool, ClientError> {
        let endpoint = normalize_endpoint(&conn.host_url);
        *self.session_mut() = Session::anonymous(endpoint.clone());

        let mut params = Map::new();
        let _ = params.insert("user".into(), Value::String(conn.user.clone()));
        let _ = params.insert(
            "password".into(),
            Value::String(conn.password.expose_secret().to_string()),
        );

        let envelope = self.call("login", params)?;
        let session_id = envelope
            .content()
            .get("session_id")
            .and_then(Value::as_str)
            .filter(|sid| !sid.is_empty());
        match session_id {
            Some(sid) if envelope.is_ok() => {
                self.session_mut().set_token(SecretString::from(sid.to_string()));
                debug!(%endpoint, user = %conn.user, "logged in");
                Ok(true)
            }
            _ => {
                warn!(%endpoint, user = %conn.user, error = ?envelope.error(), "login rejected");
                Err(ClientError::Auth {
                    endpoint,
                    user: conn.user.clone(),
                    detail: envelope.error().map(str::to_string),
                })
            }
        }
    }
}
