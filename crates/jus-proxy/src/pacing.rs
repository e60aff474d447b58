use jus_core::ProxyConfig;
use std::time::Duration;
use tokio::time::Instant;

/// Delay tiers keyed on how many requests the current epoch has issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub base_delay: Duration,
    pub medium_delay: Duration,
    pub high_delay: Duration,
    pub medium_after: u32,
    pub high_after: u32,
}

impl PacingPolicy {
    #[must_use]
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self {
            base_delay: Duration::from_millis(config.base_delay_ms),
            medium_delay: Duration::from_millis(config.medium_delay_ms),
            high_delay: Duration::from_millis(config.high_delay_ms),
            medium_after: config.medium_after_requests,
            high_after: config.high_after_requests,
        }
    }

    /// Minimum spacing before the `request_number`-th request (1-indexed).
    #[must_use]
    pub fn delay_for(&self, request_number: u32) -> Duration {
        if request_number > self.high_after {
            self.high_delay
        } else if request_number > self.medium_after {
            self.medium_delay
        } else {
            self.base_delay
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::from_config(&ProxyConfig::default())
    }
}

/// Request counter and last-request timestamp for one scraping epoch.
#[derive(Debug)]
pub struct RequestPacer {
    policy: PacingPolicy,
    request_count: u32,
    last_request: Option<Instant>,
}

impl RequestPacer {
    #[must_use]
    pub fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            request_count: 0,
            last_request: None,
        }
    }

    #[must_use]
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    /// Spacing the next request needs, ignoring time already elapsed.
    #[must_use]
    pub fn required_delay(&self) -> Duration {
        self.policy.delay_for(self.request_count + 1)
    }

    /// How long to sleep at `now` before the next request may go out.
    #[must_use]
    pub fn wait_time(&self, now: Instant) -> Duration {
        match self.last_request {
            None => Duration::ZERO,
            Some(last) => self
                .required_delay()
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.request_count = self.request_count.saturating_add(1);
        self.last_request = Some(at);
    }

    pub fn reset(&mut self) {
        self.request_count = 0;
        self.last_request = None;
    }
}
