//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port errors never
//! leave the scanner; they exist so the prober can match on them explicitly.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a single connection attempt or banner read.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("connection failed to port {port}: {reason}")]
    ConnectionFailed { port: u16, reason: String },

    #[error("connection timed out")]
    Timeout,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("host unreachable")]
    HostUnreachable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading settings or auxiliary data files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid setting `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

/// Errors surfaced to the command-line driver.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScanError::ConnectionFailed {
            port: 22,
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "connection failed to port 22: boom");

        let err = ConfigError::InvalidValue {
            field: "default_workers",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting `default_workers`: must be greater than zero"
        );
    }

    #[test]
    fn test_cli_error_wraps_config() {
        let err: CliError = ConfigError::DirectoryNotFound.into();
        assert_eq!(err.to_string(), "could not determine configuration directory");
    }
}
