//! Scan orchestrator for searching gazettes.
//!
//! `GazetteScanner` fetches the selected gazette sites in small concurrent
//! batches, pausing between batches, and searches every page for each
//! attorney name. A failing site never aborts the scan; its failure is
//! recorded as a [`SiteOutcome`] instead.

use crate::error::{Result, ScanError};
use crate::filter::StateFilter;
use crate::html::PageText;
use crate::matcher::NameMatcher;
use crate::outcome::{ScanReport, SiteOutcome, SiteReport};
use crate::publication::FoundPublication;
use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use jus_core::ScanningConfig;
use jus_gazette::{GazetteRegistry, GazetteSite};
use jus_proxy::PageFetcher;
use std::sync::Arc;
use std::time::Duration;

/// Searches official gazettes for attorney names.
pub struct GazetteScanner {
    /// Sites available for scanning
    registry: Arc<GazetteRegistry>,
    /// Page source, normally a `ProxyService`
    fetcher: Arc<dyn PageFetcher>,
    /// Batching and matching limits
    config: ScanningConfig,
}

impl GazetteScanner {
    /// Create a scanner with default scanning settings.
    #[must_use]
    pub fn new(registry: Arc<GazetteRegistry>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            registry,
            fetcher,
            config: ScanningConfig::default(),
        }
    }

    /// Replace the scanning settings.
    #[must_use]
    pub fn with_config(mut self, config: ScanningConfig) -> Self {
        self.config = config;
        self
    }

    /// Scanning settings in use.
    #[must_use]
    pub fn config(&self) -> &ScanningConfig {
        &self.config
    }

    /// Search the gazettes of `states` (all when empty) for `names`.
    ///
    /// Returns the flattened publications. Site failures are logged and
    /// otherwise contribute nothing.
    pub async fn search_publications<N, S>(
        &self,
        names: &[N],
        states: &[S],
    ) -> Result<Vec<FoundPublication>>
    where
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let filter = StateFilter::from_codes(states)?;
        let report = self.scan(names, &filter).await?;
        Ok(report.into_publications())
    }

    /// Scan every site selected by `filter` and report per-site outcomes.
    ///
    /// Sites are fetched `batch_size` at a time; each batch settles
    /// completely before the pause that precedes the next one.
    pub async fn scan<N: AsRef<str>>(
        &self,
        names: &[N],
        filter: &StateFilter,
    ) -> Result<ScanReport> {
        if names.is_empty() {
            return Err(ScanError::NoNames);
        }

        let matchers = names
            .iter()
            .map(|name| NameMatcher::new(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let sites = filter.apply(&self.registry);
        let started_at = Utc::now();
        let today = chrono::Local::now().date_naive();
        let batch_size = self.config.batch_size.max(1);
        let batch_count = sites.len().div_ceil(batch_size);

        tracing::info!(
            sites = sites.len(),
            names = matchers.len(),
            batches = batch_count,
            "Starting gazette scan"
        );

        self.fetcher.reset_counters().await;

        let mut reports = Vec::with_capacity(sites.len());
        for (index, batch) in sites.chunks(batch_size).enumerate() {
            if index > 0 {
                tracing::debug!(
                    pause_ms = self.config.batch_pause_ms,
                    "Pausing between batches"
                );
                tokio::time::sleep(Duration::from_millis(self.config.batch_pause_ms)).await;
            }

            tracing::debug!(
                batch = index + 1,
                of = batch_count,
                sites = batch.len(),
                "Scanning batch"
            );

            let outcomes = join_all(
                batch
                    .iter()
                    .map(|site| self.scan_site(site, &matchers, today)),
            )
            .await;

            reports.extend(batch.iter().zip(outcomes).map(|(site, outcome)| SiteReport {
                site_id: site.id.clone(),
                state: site.state.clone(),
                url: site.url.clone(),
                outcome,
            }));
        }

        let report = ScanReport {
            started_at,
            finished_at: Utc::now(),
            sites: reports,
        };

        tracing::info!(
            publications = report.publication_count(),
            failed_sites = report.failed_sites().len(),
            "Gazette scan finished"
        );

        Ok(report)
    }

    /// Fetch one site and search it for every name. Never fails.
    pub async fn scan_site(
        &self,
        site: &GazetteSite,
        matchers: &[NameMatcher],
        today: NaiveDate,
    ) -> SiteOutcome {
        let page = match self.fetcher.fetch(&site.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(site = %site.id, error = %e, "Failed to fetch gazette");
                return SiteOutcome::TransientError {
                    reason: e.to_string(),
                };
            }
        };

        if !page.is_success() {
            tracing::warn!(site = %site.id, status = page.status, "Gazette returned error status");
            return SiteOutcome::from_status(page.status);
        }

        let length = page.body.chars().count();
        if length < self.config.min_page_length {
            tracing::warn!(
                site = %site.id,
                length,
                min = self.config.min_page_length,
                "Gazette page too short"
            );
            return SiteOutcome::NoContent { length };
        }

        let text = PageText::extract(&page.body, &site.selector);
        let publications: Vec<FoundPublication> = matchers
            .iter()
            .flat_map(|matcher| self.search_name(site, matcher, &text, &page.url, today))
            .collect();

        if publications.is_empty() && text.is_challenge() {
            tracing::warn!(site = %site.id, "Gazette answered with a CAPTCHA page");
            return SiteOutcome::Blocked {
                reason: "captcha challenge".to_string(),
            };
        }

        tracing::info!(
            site = %site.id,
            found = publications.len(),
            "Gazette searched"
        );

        SiteOutcome::Matches { publications }
    }

    /// Publications for one name on an already extracted page.
    #[must_use]
    pub fn search_name(
        &self,
        site: &GazetteSite,
        matcher: &NameMatcher,
        text: &PageText,
        url: &str,
        today: NaiveDate,
    ) -> Vec<FoundPublication> {
        matcher
            .find_contexts(text.as_str(), &self.config)
            .into_iter()
            .map(|content| FoundPublication::new(site, matcher.name(), content, url, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jus_core::{SiteId, StateCode};
    use jus_proxy::{FetchedPage, ProxyError};

    struct StaticFetcher {
        status: u16,
        body: String,
    }

    #[async_trait::async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> jus_proxy::Result<FetchedPage> {
            Ok(FetchedPage {
                url: url.to_string(),
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait::async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> jus_proxy::Result<FetchedPage> {
            Err(ProxyError::Timeout(url.to_string()))
        }
    }

    fn site() -> GazetteSite {
        GazetteSite {
            id: SiteId::new("dje-sp").expect("valid site ID"),
            state: StateCode::new("SP").expect("valid state"),
            label: "DJE-SP".to_string(),
            url: "https://dje.example/sp".to_string(),
            selector: "div.conteudo".to_string(),
        }
    }

    fn scanner(fetcher: Arc<dyn PageFetcher>) -> GazetteScanner {
        GazetteScanner::new(Arc::new(GazetteRegistry::new()), fetcher)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date")
    }

    fn padded(content: &str) -> String {
        format!(
            "<html><body><div class=\"conteudo\">{content}</div><footer>{}</footer></body></html>",
            "rodapé ".repeat(200)
        )
    }

    fn matchers(names: &[&str]) -> Vec<NameMatcher> {
        names
            .iter()
            .map(|n| NameMatcher::new(n).expect("build matcher"))
            .collect()
    }

    #[tokio::test]
    async fn test_scan_site_matches() {
        let scanner = scanner(Arc::new(StaticFetcher {
            status: 200,
            body: padded("Intimação: adv. Maria Souza, processo 1234567-89.2024.8.26.0100"),
        }));

        let outcome = scanner
            .scan_site(&site(), &matchers(&["Maria Souza", "João Lima"]), today())
            .await;

        let publications = outcome.publications();
        assert_eq!(publications.len(), 1);
        assert_eq!(publications[0].attorney_name, "Maria Souza");
        assert_eq!(publications[0].source_url, "https://dje.example/sp");
        assert!(!publications[0].content.contains("rodapé"));
    }

    #[tokio::test]
    async fn test_scan_site_short_page() {
        let scanner = scanner(Arc::new(StaticFetcher {
            status: 200,
            body: "<html><body>Maria Souza</body></html>".to_string(),
        }));

        let outcome = scanner
            .scan_site(&site(), &matchers(&["Maria Souza"]), today())
            .await;

        assert!(matches!(outcome, SiteOutcome::NoContent { length } if length < 1000));
    }

    #[tokio::test]
    async fn test_scan_site_error_status() {
        let scanner = scanner(Arc::new(StaticFetcher {
            status: 503,
            body: padded("Maria Souza"),
        }));

        let outcome = scanner
            .scan_site(&site(), &matchers(&["Maria Souza"]), today())
            .await;

        assert!(matches!(outcome, SiteOutcome::TransientError { .. }));
    }

    #[tokio::test]
    async fn test_scan_site_fetch_failure() {
        let scanner = scanner(Arc::new(FailingFetcher));

        let outcome = scanner
            .scan_site(&site(), &matchers(&["Maria Souza"]), today())
            .await;

        assert!(matches!(outcome, SiteOutcome::TransientError { reason } if reason.starts_with("timeout")));
    }

    #[tokio::test]
    async fn test_captcha_without_matches_is_blocked() {
        let scanner = scanner(Arc::new(StaticFetcher {
            status: 200,
            body: format!(
                "<html><body><form><div class=\"g-recaptcha\"></div></form>\
                 <p>Confirme que você não é um robô</p><footer>{}</footer></body></html>",
                "rodapé ".repeat(200)
            ),
        }));

        let outcome = scanner
            .scan_site(&site(), &matchers(&["Maria Souza"]), today())
            .await;

        assert!(matches!(outcome, SiteOutcome::Blocked { .. }));
    }

    #[tokio::test]
    async fn test_captcha_word_in_content_is_not_blocked() {
        let scanner = scanner(Arc::new(StaticFetcher {
            status: 200,
            body: padded("<p>Edital sobre contratação de serviço de captcha pelo tribunal.</p>"),
        }));

        let outcome = scanner
            .scan_site(&site(), &matchers(&["Maria Souza"]), today())
            .await;

        assert!(matches!(outcome, SiteOutcome::Matches { ref publications } if publications.is_empty()));
    }

    #[tokio::test]
    async fn test_empty_names_rejected() {
        let scanner = scanner(Arc::new(FailingFetcher));
        let names: [&str; 0] = [];

        let result = scanner.scan(&names, &StateFilter::All).await;
        assert!(matches!(result, Err(ScanError::NoNames)));
    }

    #[tokio::test]
    async fn test_empty_registry_scans_nothing() {
        let scanner = scanner(Arc::new(FailingFetcher));

        let report = scanner
            .scan(&["Maria Souza"], &StateFilter::All)
            .await
            .expect("scan succeeds");
        assert!(report.sites.is_empty());
    }
}
