//! Jus Scanner - Official gazette scanning for attorney publications.
//!
//! This crate searches the registered gazette sites for mentions of the
//! office's attorneys and turns each hit into a [`FoundPublication`].
//!
//! # Features
//!
//! - Batched fetching (three sites at a time) with a pause between batches
//! - Selector-based text extraction with a whole-page fallback
//! - Case-insensitive, whitespace-tolerant name matching
//! - Case number (CNJ and legacy formats) extraction from the context
//! - Per-site tagged outcomes, so "no match" and "blocked" stay distinguishable
//!
//! Failures are isolated per site; a scan never fails because a gazette is
//! down.
//!
//! # Example
//!
//! ```rust,ignore
//! use jus_gazette::GazetteRegistry;
//! use jus_proxy::ProxyService;
//! use jus_scanner::GazetteScanner;
//! use std::sync::Arc;
//!
//! let scanner = GazetteScanner::new(
//!     Arc::new(GazetteRegistry::builtin()),
//!     Arc::new(ProxyService::new()?),
//! );
//!
//! let publications = scanner
//!     .search_publications(&["Maria Souza"], &["SP", "RJ"])
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod case_number;
pub mod error;
#[allow(missing_docs)]
pub mod filter;
pub mod html;
pub mod matcher;
pub mod orchestrator;
pub mod outcome;
#[allow(missing_docs)]
pub mod publication;

// Re-export commonly used types
pub use case_number::{extract_case_number, extract_date};
pub use error::{Result, ScanError};
pub use filter::StateFilter;
pub use html::PageText;
pub use matcher::NameMatcher;
pub use orchestrator::GazetteScanner;
pub use outcome::{ScanReport, SiteOutcome, SiteReport};
pub use publication::FoundPublication;
