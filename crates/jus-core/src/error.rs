//! Core error types for the gazette monitor.
//!
//! This module defines the central error type shared by every crate in the
//! workspace. Subsystem crates keep their own error enums and convert into
//! these variants at their boundaries.

use thiserror::Error;

/// Central error type for all gazette monitor operations.
#[derive(Error, Debug)]
pub enum JusError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// Network errors (HTTP requests, DNS, timeouts)
    #[error("network error: {0}")]
    Network(String),

    /// Gazette registry errors (definitions, loading)
    #[error("gazette error: {0}")]
    Gazette(String),

    /// Scanner errors (orchestration, extraction)
    #[error("scanner error: {0}")]
    Scanner(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `JusError`.
pub type Result<T> = std::result::Result<T, JusError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JusError::Validation("invalid state".to_string());
        assert_eq!(err.to_string(), "validation error: invalid state");

        let err = ConfigError::InvalidValue {
            field: "scanning.batch_size".to_string(),
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for scanning.batch_size: must be greater than zero"
        );
    }

    #[test]
    fn test_error_from_config() {
        let jus_err: JusError = ConfigError::NoConfigDir.into();
        assert!(matches!(jus_err, JusError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let jus_err: JusError = io_err.into();
        assert!(matches!(jus_err, JusError::Io(_)));
    }
}
