use crate::error::Result;

/// Raw result of a page fetch. Non-2xx statuses are not errors at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of gazette pages.
///
/// `ProxyService` is the production implementation; tests substitute their own.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL, returning the status and body.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;

    /// Start a new pacing epoch. Called once at the start of every scan.
    async fn reset_counters(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let mut page = FetchedPage {
            url: "https://example.com".to_string(),
            status: 200,
            body: String::new(),
        };
        assert!(page.is_success());

        page.status = 204;
        assert!(page.is_success());

        page.status = 301;
        assert!(!page.is_success());

        page.status = 404;
        assert!(!page.is_success());
    }
}
