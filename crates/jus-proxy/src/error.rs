use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ProxyError {
    /// Classify a transport error from reqwest.
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{url}: {err}"))
        } else if err.is_connect() {
            Self::Connect(format!("{url}: {err}"))
        } else if err.is_builder() {
            Self::InvalidUrl(format!("{url}: {err}"))
        } else {
            Self::Request(format!("{url}: {err}"))
        }
    }

    /// Whether the failure is likely to go away on a later run.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connect(_) | Self::Request(_))
    }
}

impl From<ProxyError> for jus_core::JusError {
    fn from(err: ProxyError) -> Self {
        jus_core::JusError::Network(err.to_string())
    }
}
