//! Outbound HTTP for gazette scraping.
//!
//! Issues GET requests that resemble a desktop browser and spaces them out
//! with an adaptive delay so gazette sites are less likely to block us.

pub mod error;
pub mod fetcher;
pub mod fingerprint;
pub mod pacing;
pub mod service;

pub use error::{ProxyError, Result};
pub use fetcher::{FetchedPage, PageFetcher};
pub use fingerprint::HeaderProfile;
pub use pacing::{PacingPolicy, RequestPacer};
pub use service::ProxyService;
