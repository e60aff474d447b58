//! Jus Gazette - Registry of official gazette sites to monitor.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): site descriptor (state, URL, CSS selector)
//! - **Registry** ([`registry`]): ordered in-memory registry, with the built-in
//!   list of state gazettes
//! - **Loader** ([`loader`]): TOML file loading for deployments that override
//!   the built-in list
//! - **Errors** ([`error`]): gazette-specific error types
//!
//! # Example
//!
//! ```rust
//! use jus_core::StateCode;
//! use jus_gazette::GazetteRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = GazetteRegistry::builtin();
//! let sites = registry.filter_by_states(&[StateCode::new("SP")?]);
//!
//! assert_eq!(sites.len(), 1);
//! assert_eq!(sites[0].label, "DJE-SP");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::GazetteSite;
pub use error::{GazetteError, Result};
pub use loader::GazetteLoader;
pub use registry::GazetteRegistry;
