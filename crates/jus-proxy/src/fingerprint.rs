use crate::error::{ProxyError, Result};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Common desktop user agents
pub const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Browser-like header set for a single request.
#[derive(Debug, Clone)]
pub struct HeaderProfile {
    pub user_agent: &'static str,
    pub accept_language: String,
    pub referer: String,
}

impl HeaderProfile {
    /// Pick a random user agent and derive a same-origin referer from `url`.
    pub fn randomized(url: &str, accept_language: &str) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let ua_idx = rng.gen_range(0..USER_AGENTS.len());

        Ok(Self {
            user_agent: USER_AGENTS[ua_idx],
            accept_language: accept_language.to_string(),
            referer: referer_for(url)?,
        })
    }

    /// Header name/value pairs in the order a browser sends them.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user-agent", self.user_agent.to_string()),
            ("accept", ACCEPT.to_string()),
            ("accept-language", self.accept_language.clone()),
            ("accept-encoding", "gzip, br".to_string()),
            ("referer", self.referer.clone()),
            ("upgrade-insecure-requests", "1".to_string()),
            ("sec-fetch-dest", "document".to_string()),
            ("sec-fetch-mode", "navigate".to_string()),
            ("sec-fetch-site", "same-origin".to_string()),
            ("sec-fetch-user", "?1".to_string()),
        ]
    }

    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.pairs() {
            let value = HeaderValue::from_str(&value).map_err(|e| ProxyError::InvalidHeader {
                name,
                reason: e.to_string(),
            })?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(headers)
    }
}

/// `{scheme}://{host}[:port]/` of the target URL.
pub fn referer_for(url: &str) -> Result<String> {
    let parsed =
        url::Url::parse(url).map_err(|e| ProxyError::InvalidUrl(format!("{url}: {e}")))?;

    if parsed.host_str().is_none() {
        return Err(ProxyError::InvalidUrl(format!("{url}: no host in URL")));
    }

    Ok(format!("{}/", parsed.origin().ascii_serialization()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomized_profile() {
        let profile = HeaderProfile::randomized("https://dje.tjsp.jus.br/cdje/index.do", "pt-BR")
            .expect("valid URL");
        assert!(USER_AGENTS.contains(&profile.user_agent));
        assert_eq!(profile.referer, "https://dje.tjsp.jus.br/");
        assert_eq!(profile.accept_language, "pt-BR");
    }

    #[test]
    fn test_user_agent_variation() {
        // Probabilistic, but 50 draws from 5 agents all landing on one is negligible
        let agents: std::collections::HashSet<_> = (0..50)
            .map(|_| {
                HeaderProfile::randomized("https://example.com", "pt-BR")
                    .expect("valid URL")
                    .user_agent
            })
            .collect();
        assert!(agents.len() > 1, "Expected variation in user agents");
    }

    #[test]
    fn test_referer_keeps_port() {
        assert_eq!(
            referer_for("http://127.0.0.1:8080/diario?page=2").expect("valid URL"),
            "http://127.0.0.1:8080/"
        );
    }

    #[test]
    fn test_referer_invalid_url() {
        assert!(referer_for("not-a-url").is_err());
        assert!(matches!(
            HeaderProfile::randomized("dje.tjsp.jus.br", "pt-BR"),
            Err(ProxyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_header_map_contains_browser_headers() {
        let profile =
            HeaderProfile::randomized("https://www.tjmg.jus.br/", "pt-BR").expect("valid URL");
        let headers = profile.to_header_map().expect("valid headers");

        for name in [
            "user-agent",
            "accept",
            "accept-language",
            "accept-encoding",
            "referer",
            "sec-fetch-dest",
            "sec-fetch-mode",
            "sec-fetch-site",
            "sec-fetch-user",
        ] {
            assert!(headers.contains_key(name), "missing header {name}");
        }
        assert_eq!(headers["referer"], "https://www.tjmg.jus.br/");
    }
}
