//! Client configuration.
//!
//! Defaults point at the public provider endpoints; every setting can be
//! overridden through `THAIFIN_*` environment variables or the `with_*`
//! builders.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::retry::RetryConfig;

pub const DEFAULT_REGISTRY_BASE_URL: &str =
    "https://raw.githubusercontent.com/lumduan/thai-securities-data/main";
pub const DEFAULT_STATEMENT_BASE_URL: &str = "https://www.finnomena.com/market-info/api/public";

/// Settings shared by the provider adapters and the search facade.
#[derive(Debug, Clone)]
pub struct ThaifinConfig {
    pub registry_base_url: String,
    pub statement_base_url: String,
    pub cache_ttl: Duration,
    pub request_timeout_ms: u64,
    pub retry: RetryConfig,
    /// Minimum similarity (0..=100) for a search candidate to be returned.
    pub search_score_cutoff: u8,
    pub user_agent: String,
}

impl Default for ThaifinConfig {
    fn default() -> Self {
        Self {
            registry_base_url: String::from(DEFAULT_REGISTRY_BASE_URL),
            statement_base_url: String::from(DEFAULT_STATEMENT_BASE_URL),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            request_timeout_ms: 10_000,
            retry: RetryConfig::default(),
            search_score_cutoff: 60,
            user_agent: String::from(concat!("thaifin/", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl ThaifinConfig {
    /// Defaults overridden by whatever `THAIFIN_*` variables are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("THAIFIN_REGISTRY_BASE_URL") {
            config.registry_base_url = trim_base_url(&url);
        }
        if let Some(url) = lookup("THAIFIN_STATEMENT_BASE_URL") {
            config.statement_base_url = trim_base_url(&url);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "THAIFIN_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(timeout_ms) = parse_var::<u64>(&lookup, "THAIFIN_TIMEOUT_MS") {
            config.request_timeout_ms = timeout_ms;
        }
        if let Some(max_retries) = parse_var::<u32>(&lookup, "THAIFIN_MAX_RETRIES") {
            config.retry.max_retries = max_retries;
            config.retry.enabled = max_retries > 0;
        }
        if let Some(cutoff) = parse_var::<u8>(&lookup, "THAIFIN_SEARCH_SCORE_CUTOFF") {
            config.search_score_cutoff = cutoff.min(100);
        }
        if let Some(user_agent) = lookup("THAIFIN_USER_AGENT") {
            config.user_agent = user_agent;
        }

        config
    }

    pub fn with_registry_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.registry_base_url = trim_base_url(url.as_ref());
        self
    }

    pub fn with_statement_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.statement_base_url = trim_base_url(url.as_ref());
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn with_search_score_cutoff(mut self, cutoff: u8) -> Self {
        self.search_score_cutoff = cutoff.min(100);
        self
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring malformed configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ThaifinConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        ThaifinConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_match_provider_conventions() {
        let config = ThaifinConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(86_400));
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.search_score_cutoff, 60);
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = config_from(&[
            ("THAIFIN_REGISTRY_BASE_URL", "http://localhost:8080/registry/"),
            ("THAIFIN_CACHE_TTL_SECS", "60"),
            ("THAIFIN_MAX_RETRIES", "0"),
            ("THAIFIN_SEARCH_SCORE_CUTOFF", "250"),
        ]);

        assert_eq!(config.registry_base_url, "http://localhost:8080/registry");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert!(!config.retry.enabled);
        assert_eq!(config.search_score_cutoff, 100);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = config_from(&[("THAIFIN_TIMEOUT_MS", "soon")]);
        assert_eq!(config.request_timeout_ms, 10_000);
    }
}
