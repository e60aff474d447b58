//! Gazette site descriptor.

use crate::error::{GazetteError, Result};
use jus_core::{SiteId, StateCode};
use serde::{Deserialize, Serialize};

/// One official gazette page to scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteSite {
    /// Unique site identifier (e.g., "dje-sp")
    pub id: SiteId,

    /// State the gazette belongs to
    pub state: StateCode,

    /// Short label reported with each publication (e.g., "DJE-SP")
    pub label: String,

    /// Page fetched on every scan
    pub url: String,

    /// CSS selector for the elements carrying publication text
    pub selector: String,
}

impl GazetteSite {
    /// Get the site ID.
    #[must_use]
    pub fn id(&self) -> &SiteId {
        &self.id
    }

    /// Validate the site definition for completeness and correctness.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(self.invalid("label cannot be empty".to_string()));
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| self.invalid(format!("invalid URL '{}': {e}", self.url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(self.invalid(format!(
                "URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.selector.trim().is_empty() {
            return Err(self.invalid("selector cannot be empty".to_string()));
        }
        scraper::Selector::parse(&self.selector)
            .map_err(|e| self.invalid(format!("invalid selector '{}': {e}", self.selector)))?;

        Ok(())
    }

    fn invalid(&self, reason: String) -> GazetteError {
        GazetteError::ValidationError {
            site_id: self.id.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(url: &str, selector: &str) -> GazetteSite {
        GazetteSite {
            id: SiteId::new("dje-test").expect("valid site ID"),
            state: StateCode::new("SP").expect("valid state"),
            label: "DJE-TEST".to_string(),
            url: url.to_string(),
            selector: selector.to_string(),
        }
    }

    #[test]
    fn test_valid_site() {
        assert!(site("https://dje.example.jus.br/consulta", "div.publicacao, #conteudo")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = site("dje.example.jus.br", "div").validate().unwrap_err();
        assert!(matches!(err, GazetteError::ValidationError { .. }));

        assert!(site("ftp://dje.example.jus.br", "div").validate().is_err());
    }

    #[test]
    fn test_rejects_bad_selector() {
        assert!(site("https://dje.example.jus.br", "div[").validate().is_err());
        assert!(site("https://dje.example.jus.br", "  ").validate().is_err());
    }

    #[test]
    fn test_rejects_empty_label() {
        let mut s = site("https://dje.example.jus.br", "div");
        s.label = String::new();
        assert!(s.validate().is_err());
    }
}
