//! Per-site scan outcomes and the aggregated scan report.

use crate::publication::FoundPublication;
use chrono::{DateTime, Utc};
use jus_core::{SiteId, StateCode};
use serde::{Deserialize, Serialize};

/// What happened when a single gazette site was scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SiteOutcome {
    /// Page fetched and searched. Empty when no name appeared.
    Matches {
        /// Publications found on the page
        publications: Vec<FoundPublication>,
    },

    /// Page body was too short to contain publications.
    NoContent {
        /// Body length in characters
        length: usize,
    },

    /// The gazette answered 404 or 410.
    NotFound {
        /// HTTP status code
        #[serde(rename = "http_status")]
        status: u16,
    },

    /// The gazette refused us (401/403/429 or a CAPTCHA page).
    Blocked {
        /// Why the site is considered blocked
        reason: String,
    },

    /// Timeout, connection failure or an unexpected status.
    TransientError {
        /// Error description
        reason: String,
    },
}

impl SiteOutcome {
    /// Classify a non-2xx HTTP status.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            404 | 410 => Self::NotFound { status },
            401 | 403 | 429 => Self::Blocked {
                reason: format!("HTTP {status}"),
            },
            _ => Self::TransientError {
                reason: format!("HTTP {status}"),
            },
        }
    }

    /// Publications carried by this outcome.
    #[must_use]
    pub fn publications(&self) -> &[FoundPublication] {
        match self {
            Self::Matches { publications } => publications,
            _ => &[],
        }
    }

    /// Whether the site could not be searched at all.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Blocked { .. } | Self::TransientError { .. }
        )
    }
}

/// Outcome of one site, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteReport {
    /// Site identifier
    pub site_id: SiteId,
    /// State of the gazette
    pub state: StateCode,
    /// URL that was fetched
    pub url: String,
    /// What happened
    pub outcome: SiteOutcome,
}

/// Result of a full scan, sites in batch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the scan started
    pub started_at: DateTime<Utc>,
    /// When the last batch settled
    pub finished_at: DateTime<Utc>,
    /// One entry per attempted site
    pub sites: Vec<SiteReport>,
}

impl ScanReport {
    /// All publications, in site order.
    #[must_use]
    pub fn publications(&self) -> Vec<&FoundPublication> {
        self.sites
            .iter()
            .flat_map(|site| site.outcome.publications())
            .collect()
    }

    /// Consume the report, keeping only the publications.
    #[must_use]
    pub fn into_publications(self) -> Vec<FoundPublication> {
        self.sites
            .into_iter()
            .flat_map(|site| match site.outcome {
                SiteOutcome::Matches { publications } => publications,
                _ => Vec::new(),
            })
            .collect()
    }

    /// Total number of publications found.
    #[must_use]
    pub fn publication_count(&self) -> usize {
        self.sites
            .iter()
            .map(|site| site.outcome.publications().len())
            .sum()
    }

    /// Sites that could not be searched.
    #[must_use]
    pub fn failed_sites(&self) -> Vec<&SiteReport> {
        self.sites
            .iter()
            .filter(|site| site.outcome.is_failure())
            .collect()
    }
}
