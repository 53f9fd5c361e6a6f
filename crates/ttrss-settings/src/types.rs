//! Connection settings.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Default server location when nothing else is configured.
pub const DEFAULT_HOST_URL: &str = "http://localhost/tt-rss";
/// Default login name.
pub const DEFAULT_USER: &str = "admin";

/// Where and as whom to log in.
#[derive(Clone)]
pub struct ConnInfo {
    /// Server base URL; the `/api/` suffix is added by the client.
    pub host_url: String,
    pub user: String,
    pub password: SecretString,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

impl ConnInfo {
    pub fn new(host_url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host_url: host_url.into(),
            user: user.into(),
            password: SecretString::from(password.into()),
            timeout_secs: None,
        }
    }

    /// Whether a non-empty password is configured.
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }
}

impl Default for ConnInfo {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_URL, DEFAULT_USER, String::new())
    }
}

impl std::fmt::Debug for ConnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnInfo")
            .field("host_url", &self.host_url)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// On-disk shape of `settings.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SettingsFile {
    pub host_url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
}
