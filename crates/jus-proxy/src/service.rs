use crate::error::{ProxyError, Result};
use crate::fetcher::{FetchedPage, PageFetcher};
use crate::fingerprint::HeaderProfile;
use crate::pacing::{PacingPolicy, RequestPacer};
use jus_core::ProxyConfig;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Outbound HTTP client that looks like a desktop browser and paces itself.
///
/// The pacer is shared behind a mutex held across the wait, so concurrent
/// callers on one instance still get spaced request starts.
pub struct ProxyService {
    client: Client,
    pacer: Mutex<RequestPacer>,
    accept_language: String,
}

impl ProxyService {
    /// Create a proxy service with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ProxyConfig::default())
    }

    pub fn with_config(config: &ProxyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            pacer: Mutex::new(RequestPacer::new(PacingPolicy::from_config(config))),
            accept_language: config.accept_language.clone(),
        })
    }

    /// Fetch `url` after the adaptive delay, with a fresh randomized header set.
    ///
    /// Any HTTP status is returned as a page; only transport failures are errors.
    pub async fn fetch_with_proxy(&self, url: &str) -> Result<FetchedPage> {
        let profile = HeaderProfile::randomized(url, &self.accept_language)?;
        let headers = profile.to_header_map()?;

        let waited = self.pace().await;
        debug!(
            url,
            waited_ms = %waited.as_millis(),
            user_agent = profile.user_agent,
            "fetching page"
        );

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "request failed");
                ProxyError::from_reqwest(url, &e)
            })?;

        let status = response.status().as_u16();
        // decoded with the Content-Type charset, UTF-8 when absent
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::from_reqwest(url, &e))?;

        debug!(url, status, bytes = body.len(), "page fetched");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }

    /// Sleep out the remainder of the current delay tier and count the request.
    async fn pace(&self) -> Duration {
        let mut pacer = self.pacer.lock().await;
        let wait = pacer.wait_time(Instant::now());
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        pacer.record(Instant::now());
        wait
    }

    pub async fn reset_counters(&self) {
        self.pacer.lock().await.reset();
    }

    pub async fn request_count(&self) -> u32 {
        self.pacer.lock().await.request_count()
    }
}

#[async_trait::async_trait]
impl PageFetcher for ProxyService {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.fetch_with_proxy(url).await
    }

    async fn reset_counters(&self) {
        ProxyService::reset_counters(self).await;
    }
}
