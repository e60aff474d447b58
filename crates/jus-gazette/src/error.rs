//! Error types for the gazette registry.

use thiserror::Error;

/// Errors that can occur in gazette registry operations.
#[derive(Error, Debug)]
pub enum GazetteError {
    /// Site definition not found
    #[error("gazette site not found: {site_id}")]
    NotFound {
        /// The site ID that was not found
        site_id: String,
    },

    /// Failed to load site definition from file
    #[error("failed to load gazette definition from {path}: {source}")]
    LoadError {
        /// Path to the definition file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse site definition TOML
    #[error("failed to parse gazette definition TOML in {path}: {source}")]
    ParseError {
        /// Path to the definition file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid site definition (validation failed)
    #[error("invalid gazette definition for {site_id}: {reason}")]
    ValidationError {
        /// Site ID being validated
        site_id: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Definitions directory not found
    #[error("gazette definitions directory not found at {path}")]
    DirectoryNotFound {
        /// Expected directory path
        path: String,
    },

    /// I/O error while accessing definitions
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid site ID or state code
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] jus_core::JusError),
}

impl From<GazetteError> for jus_core::JusError {
    fn from(err: GazetteError) -> Self {
        match err {
            GazetteError::InvalidId(inner) => inner,
            other => jus_core::JusError::Gazette(other.to_string()),
        }
    }
}

/// Result type for gazette registry operations.
pub type Result<T> = std::result::Result<T, GazetteError>;
