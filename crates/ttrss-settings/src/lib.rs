//! # ttrss-settings
//!
//! Connection settings for the ttrss client: server URL, credentials and
//! request timeout, loaded from `~/.ttrss/settings.json` with `TTRSS_*`
//! environment variable overrides.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides_from, env_vars, load_conn_info,
    load_conn_info_from_path, settings_path,
};
pub use types::{ConnInfo, DEFAULT_HOST_URL, DEFAULT_USER};
