//! Byte-level transport seam between the channel and the network.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use ttrss_core::ClientError;

/// Errors raised by a [`Transport`] before any response body is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Failure reported by a non-HTTP transport.
    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        ClientError::Connection(e.to_string())
    }
}

/// Sends one JSON request body and returns the raw response body.
///
/// Implementations must not interpret the body; the HTTP status, if any,
/// is not a failure.
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Transport with the HTTP client's default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        let status = response.status();
        debug!(%status, url, "api response received");
        Ok(response.bytes()?.to_vec())
    }
}
