//! Client configuration.
//!
//! Defaults suit a backend on `localhost:8000`; `JUDGEFLOW_API_URL` and
//! `JUDGEFLOW_TIMEOUT_SECS` override them, and the `--api-url` flag
//! overrides the environment.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "JUDGEFLOW_API_URL";
pub const TIMEOUT_ENV: &str = "JUDGEFLOW_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "judgeflow=info";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API origin without a trailing slash, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Defaults overlaid with the environment. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config = config.with_api_base_url(url);
            }
        }

        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        config
    }

    /// Absolute URL for an API path such as `/problems/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
