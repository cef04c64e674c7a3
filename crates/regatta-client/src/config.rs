use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Reads `REGATTA_API_URL` and `REGATTA_TIMEOUT_SECS`, falling back to
    /// the local development backend.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("REGATTA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match std::env::var("REGATTA_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .context("REGATTA_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::default()
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = ClientConfig::default().with_base_url("https://regatta.example.com/api/");
        assert_eq!(config.base_url, "https://regatta.example.com/api");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
