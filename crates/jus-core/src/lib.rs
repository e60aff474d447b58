//! Jus Core - Foundation crate for the JusGestão gazette monitor.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other `jus-*` crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared newtypes (`StateCode`, `SiteId`)
//!
//! # Example
//!
//! ```rust
//! use jus_core::{AppConfig, StateCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.scanning.batch_size, 3);
//!
//! let state = StateCode::new("sp")?;
//! assert_eq!(state.as_str(), "SP");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, GazetteConfig, ProxyConfig, ScanningConfig};
pub use error::{ConfigError, ConfigResult, JusError, Result};
pub use types::{SiteId, StateCode};
