//! Connection settings loading with environment variable overrides.
//!
//! Loading flow:
//! 1. Start with [`ConnInfo::default()`]
//! 2. If `~/.ttrss/settings.json` exists, apply its non-null values
//! 3. Apply `TTRSS_*` environment variable overrides (highest priority)
//!
//! Empty environment variables are ignored.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{ConnInfo, SettingsFile};

/// Environment variable names read by [`apply_env_overrides`].
pub mod env_vars {
    pub const URL: &str = "TTRSS_URL";
    pub const USER: &str = "TTRSS_USER";
    pub const PASSWORD: &str = "TTRSS_PASSWORD";
    pub const TIMEOUT_SECS: &str = "TTRSS_TIMEOUT_SECS";
}

/// Resolve the path to the settings file (`~/.ttrss/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".ttrss").join("settings.json")
}

/// Load connection settings from the default path with env var overrides.
pub fn load_conn_info() -> Result<ConnInfo> {
    load_conn_info_from_path(&settings_path())
}

/// Load connection settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_conn_info_from_path(path: &Path) -> Result<ConnInfo> {
    let mut conn = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SettingsFile =
            serde_json::from_str(&content).map_err(|source| SettingsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        merge_file(ConnInfo::default(), file)
    } else {
        debug!(?path, "settings file not found, using defaults");
        ConnInfo::default()
    };

    apply_env_overrides(&mut conn)?;
    validate(&conn)?;
    Ok(conn)
}

fn merge_file(mut conn: ConnInfo, file: SettingsFile) -> ConnInfo {
    if let Some(url) = file.host_url {
        conn.host_url = url;
    }
    if let Some(user) = file.user {
        conn.user = user;
    }
    if let Some(password) = file.password {
        conn.password = SecretString::from(password);
    }
    if file.timeout_secs.is_some() {
        conn.timeout_secs = file.timeout_secs;
    }
    conn
}

/// Apply `TTRSS_*` overrides from the process environment.
pub fn apply_env_overrides(conn: &mut ConnInfo) -> Result<()> {
    apply_overrides_from(conn, read_env_string)
}

/// Apply overrides from an arbitrary lookup, for callers that do not want
/// to touch the process environment.
pub fn apply_overrides_from<F>(conn: &mut ConnInfo, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(env_vars::URL) {
        debug!(host_url = %url, "host_url overridden from environment");
        conn.host_url = url;
    }
    if let Some(user) = lookup(env_vars::USER) {
        conn.user = user;
    }
    if let Some(password) = lookup(env_vars::PASSWORD) {
        conn.password = SecretString::from(password);
    }
    if let Some(raw) = lookup(env_vars::TIMEOUT_SECS) {
        conn.timeout_secs = Some(parse_timeout(&raw)?);
    }
    Ok(())
}

fn validate(conn: &ConnInfo) -> Result<()> {
    if conn.host_url.trim().is_empty() {
        return Err(SettingsError::invalid("host_url", "must not be empty"));
    }
    if conn.timeout_secs == Some(0) {
        return Err(SettingsError::invalid("timeout_secs", "must be positive"));
    }
    Ok(())
}

// ── Env var helpers ─────────────────────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_timeout(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(SettingsError::invalid(
            env_vars::TIMEOUT_SECS,
            format!("expected a positive integer, got {raw:?}"),
        )),
    }
}
