//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Why connection settings could not be loaded.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// `field` names the settings key or environment variable at fault.
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_names_the_file() {
        let err = SettingsError::Io {
            path: PathBuf::from("/home/u/.ttrss/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read settings file /home/u/.ttrss/settings.json: denied"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_value_names_the_field() {
        let err = SettingsError::invalid("TTRSS_TIMEOUT_SECS", "expected a positive integer");
        assert_eq!(
            err.to_string(),
            "invalid TTRSS_TIMEOUT_SECS: expected a positive integer"
        );
    }
}
