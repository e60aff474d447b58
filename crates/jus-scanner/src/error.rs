//! Scanner errors.
//!
//! Only input problems surface here. Site-level failures are reported as
//! [`SiteOutcome`](crate::outcome::SiteOutcome) values instead.

use thiserror::Error;

/// Errors that abort a scan before any site is fetched.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The caller passed no attorney names.
    #[error("at least one attorney name is required")]
    NoNames,

    /// A name contains no searchable characters.
    #[error("invalid attorney name: '{name}'")]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// A state filter entry is not a valid state code.
    #[error("invalid state filter: {0}")]
    InvalidState(#[from] jus_core::JusError),

    /// The name pattern could not be compiled.
    #[error("failed to build name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<ScanError> for jus_core::JusError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidState(inner) => inner,
            other => jus_core::JusError::Scanner(other.to_string()),
        }
    }
}

/// Result type for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;
